mod common;

use cgmath::{SquareMatrix, Vector3};
use common::test_utils::{
    FakeUploader, TempAssets, encode_png, labelled, record_frame, rgb_image,
};
use image::{DynamicImage, GrayImage};
use still_life::{
    data_structures::shapes::{BoxSide, Shape},
    render::{FrameRecorder, TextureBinding, UniformSink},
    resources::texture::TextureError,
    scene::{SCENE_TEXTURES, SceneManager, lights::scene_lights, textures::MAX_TEXTURE_SLOTS},
};

#[test]
fn replays_every_draw_in_order() {
    let assets = TempAssets::new("order").with_scene_textures();
    let (scene, recorder) = record_frame(assets.path());

    assert_eq!(scene.layout().len(), 38);
    assert_eq!(recorder.draws().len(), 38);

    let labels: Vec<_> = scene.layout().iter().map(|call| call.label).collect();
    assert_eq!(&labels[..4], ["counter", "backsplash", "tray", "pot bottom"]);
    assert_eq!(labels.iter().filter(|&&l| l == "stem").count(), 5);
    assert_eq!(labels.iter().filter(|&&l| l == "leaf").count(), 8);
    assert_eq!(labels.iter().filter(|&&l| l == "clock body").count(), 5);
    assert_eq!(labels.last(), Some(&"shaker cap"));

    let shapes: Vec<_> = recorder.draws().iter().map(|draw| draw.shape).collect();
    assert_eq!(&shapes[..3], [Shape::Plane, Shape::Plane, Shape::Box]);
}

#[test]
fn replay_is_deterministic_across_frames() {
    let assets = TempAssets::new("frames").with_scene_textures();
    let (scene, mut recorder) = record_frame(assets.path());
    let first = recorder.draws().to_vec();

    recorder.begin_frame();
    scene.render_scene(&mut recorder);
    assert_eq!(recorder.draws(), first.as_slice());
}

#[test]
fn all_textures_get_consecutive_slots() {
    let assets = TempAssets::new("slots").with_scene_textures();
    let mut scene = SceneManager::new(assets.path());
    let mut uploader = FakeUploader::default();
    scene.prepare_scene(&mut uploader);

    assert_eq!(uploader.uploads, SCENE_TEXTURES.len());
    assert_eq!(scene.textures().len(), 11);
    for (slot, (_, tag)) in SCENE_TEXTURES.iter().enumerate() {
        assert_eq!(scene.find_texture_slot(tag), Some(slot));
    }
    assert_eq!(scene.find_texture_slot("potRim"), Some(2));
    let rim = scene.find_texture_id("potRim").unwrap();
    assert_eq!((rim.width, rim.height, rim.channels), (4, 2, 3));
}

#[test]
fn draws_pick_up_their_textures_and_materials() {
    let assets = TempAssets::new("surfaces").with_scene_textures();
    let (scene, recorder) = record_frame(assets.path());

    let counter = &recorder.draws()[0].state;
    assert_eq!(counter.texture, Some(TextureBinding::Slot(6)));
    assert_eq!(counter.shininess, 28.0);

    let dirt = &labelled(&scene, &recorder, "pot dirt")[0].state;
    assert_eq!(dirt.texture, scene.find_texture_slot("potDirt").map(TextureBinding::Slot));
    assert_eq!(dirt.shininess, 0.3);
}

#[test]
fn stems_and_leaves_inherit_the_pot_material() {
    let assets = TempAssets::new("inherit").with_scene_textures();
    let (scene, recorder) = record_frame(assets.path());
    let cement = scene.find_material("cement").unwrap();

    let stems = labelled(&scene, &recorder, "stem");
    assert_eq!(stems.len(), 5);
    for stem in stems {
        assert_eq!(stem.state.texture, Some(TextureBinding::Slot(7)));
        assert_eq!(stem.state.diffuse_color, cement.diffuse_color);
        assert_eq!(stem.state.specular_color, cement.specular_color);
        assert_eq!(stem.state.shininess, cement.shininess);
    }

    let leaves = labelled(&scene, &recorder, "leaf");
    assert_eq!(leaves.len(), 8);
    assert!(leaves.iter().all(|leaf| leaf.state.shininess == cement.shininess));
    assert!(leaves.iter().all(|leaf| leaf.shape == Shape::HalfSphere));
}

#[test]
fn clock_face_is_flat_white_plastic() {
    let assets = TempAssets::new("clock").with_scene_textures();
    let (scene, recorder) = record_frame(assets.path());

    let face = labelled(&scene, &recorder, "clock face")[0];
    assert_eq!(face.shape, Shape::BoxSide(BoxSide::Front));
    assert_eq!(face.state.texture, None);
    assert_eq!(face.state.color, [1.0; 4]);
    assert_eq!(face.state.shininess, 20.0);
    assert!(!face.is_transparent());

    // the hands switch back to the plastic texture and keep the material
    let hands = labelled(&scene, &recorder, "minute hand");
    let plastic = scene.find_texture_slot("plastic").map(TextureBinding::Slot);
    assert_eq!(hands[0].state.texture, plastic);
    assert_eq!(hands[0].state.shininess, 20.0);
}

#[test]
fn only_shaker_glass_is_transparent() {
    let assets = TempAssets::new("glass").with_scene_textures();
    let (scene, recorder) = record_frame(assets.path());

    let transparent: Vec<_> = scene
        .layout()
        .iter()
        .zip(recorder.draws())
        .filter(|(_, draw)| draw.is_transparent())
        .map(|(call, _)| call.label)
        .collect();
    assert_eq!(
        transparent,
        ["shaker body", "shaker neck", "shaker body", "shaker neck"]
    );

    let body = labelled(&scene, &recorder, "shaker body")[0];
    assert_eq!(body.state.color, [1.0, 1.0, 1.0, 0.3]);
    assert_eq!(body.state.shininess, 95.0);
}

#[test]
fn missing_textures_do_not_abort_preparation() {
    let assets = TempAssets::new("empty");
    let (scene, recorder) = record_frame(assets.path());

    assert!(scene.textures().is_empty());
    assert_eq!(scene.materials().len(), 7);
    assert_eq!(scene.lights(), &scene_lights());
    assert_eq!(recorder.draws().len(), 38);

    let counter = &recorder.draws()[0].state;
    assert_eq!(counter.texture, Some(TextureBinding::Missing));
    // the material still applies
    assert_eq!(counter.shininess, 28.0);
}

#[test]
fn broken_textures_are_skipped_individually() {
    let assets = TempAssets::new("broken").with_scene_textures();
    assets.write_bytes("textures/dirt.jpg", b"not an image");
    let grey = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
    assets.write_bytes("textures/metal.jpg", &encode_png(&grey));

    let (scene, recorder) = record_frame(assets.path());
    assert_eq!(scene.textures().len(), 9);
    assert_eq!(scene.find_texture_slot("potDirt"), None);
    assert_eq!(scene.find_texture_slot("metal"), None);
    // later textures move up
    assert_eq!(scene.find_texture_slot("backsplash"), Some(4));

    let dirt = &labelled(&scene, &recorder, "pot dirt")[0].state;
    assert_eq!(dirt.texture, Some(TextureBinding::Missing));
}

#[test]
fn create_texture_reports_why_it_failed() {
    let assets = TempAssets::new("create");
    assets.write_image("textures/ok.png", &rgb_image(2, 2, [1, 2, 3]));
    let mut scene = SceneManager::new(assets.path());
    let mut uploader = FakeUploader::default();

    assert_eq!(scene.create_texture("textures/ok.png", "ok", &mut uploader).unwrap(), 0);
    assert!(matches!(
        scene.create_texture("textures/absent.png", "absent", &mut uploader),
        Err(TextureError::Io { .. })
    ));
    assert_eq!(uploader.uploads, 1);
}

#[test]
fn texture_slots_run_out_after_sixteen() {
    let assets = TempAssets::new("full");
    assets.write_image("textures/ok.png", &rgb_image(1, 1, [0, 0, 0]));
    let mut scene = SceneManager::new(assets.path());
    let mut uploader = FakeUploader::default();

    for i in 0..MAX_TEXTURE_SLOTS {
        let tag = format!("t{i}");
        assert_eq!(scene.create_texture("textures/ok.png", &tag, &mut uploader).unwrap(), i);
    }
    // refused before the file is even read
    assert!(matches!(
        scene.create_texture("textures/absent.png", "extra", &mut uploader),
        Err(TextureError::SlotsExhausted(MAX_TEXTURE_SLOTS))
    ));
    assert_eq!(uploader.uploads, MAX_TEXTURE_SLOTS);
}

#[test]
fn unknown_material_pushes_nothing() {
    let assets = TempAssets::new("material");
    let (scene, mut recorder) = record_frame(assets.path());
    let before = recorder.state().clone();

    scene.set_shader_material(&mut recorder, "wood");
    assert_eq!(recorder.state(), &before);

    scene.set_shader_material(&mut recorder, "metal");
    assert_eq!(recorder.state().shininess, 24.0);
}

#[test]
fn uniform_setters_update_the_state() {
    let assets = TempAssets::new("setters").with_scene_textures();
    let mut scene = SceneManager::new(assets.path());
    scene.prepare_scene(&mut FakeUploader::default());
    let mut recorder = FrameRecorder::new();

    scene.set_shader_texture(&mut recorder, "leaf");
    assert_eq!(recorder.state().texture, Some(TextureBinding::Slot(8)));

    scene.set_texture_uv_scale(&mut recorder, 2.0, 3.0);
    assert_eq!(recorder.state().uv_scale, [2.0, 3.0]);

    scene.set_shader_color(&mut recorder, [0.1, 0.2, 0.3, 1.0]);
    assert_eq!(recorder.state().texture, None);
    assert_eq!(recorder.state().color, [0.1, 0.2, 0.3, 1.0]);

    scene.set_shader_texture(&mut recorder, "nope");
    assert_eq!(recorder.state().texture, Some(TextureBinding::Missing));

    recorder.set_model(cgmath::Matrix4::identity());
    assert!(recorder.state().model.is_identity());
}

#[test]
fn lighting_is_pushed_before_the_draws() {
    let assets = TempAssets::new("lighting");
    let (_, recorder) = record_frame(assets.path());
    assert_eq!(recorder.lighting(), Some(&scene_lights().to_uniform()));
}

#[test]
fn unprepared_scene_draws_nothing() {
    let scene: SceneManager<()> = SceneManager::new("/nonexistent");
    let mut recorder = FrameRecorder::new();
    scene.render_scene(&mut recorder);

    assert!(recorder.draws().is_empty());
    // lighting is still pushed, just switched off
    assert_eq!(recorder.lighting().map(|l| l.use_lighting), Some(0));
}

#[test]
fn destroying_textures_falls_back_to_missing() {
    let assets = TempAssets::new("destroy").with_scene_textures();
    let (mut scene, mut recorder) = record_frame(assets.path());
    assert_eq!(scene.textures().len(), 11);

    scene.destroy_textures();
    assert!(scene.textures().is_empty());
    assert_eq!(scene.find_texture_id("counter"), None);

    recorder.begin_frame();
    scene.render_scene(&mut recorder);
    assert_eq!(recorder.draws().len(), 38);
    assert_eq!(recorder.draws()[0].state.texture, Some(TextureBinding::Missing));
    assert_eq!(recorder.draws()[0].state.diffuse_color, Vector3::new(0.6, 0.6, 0.6));
}

#[test]
fn textures_larger_than_the_device_allows_are_skipped() {
    let assets = TempAssets::new("too-large");
    assets.write_image("textures/huge.png", &rgb_image(9, 1, [5, 5, 5]));
    assets.write_image("textures/ok.png", &rgb_image(8, 8, [5, 5, 5]));
    let mut scene = SceneManager::new(assets.path());
    let mut uploader = FakeUploader::with_max_dimension(8);

    match scene.create_texture("textures/huge.png", "huge", &mut uploader) {
        Err(TextureError::TooLarge { label, width, height, max }) => {
            assert_eq!(label, "huge");
            assert_eq!((width, height, max), (9, 1, 8));
        }
        other => panic!("expected the texture to be refused, got {other:?}"),
    }
    assert_eq!(uploader.uploads, 0);
    assert_eq!(scene.find_texture_slot("huge"), None);

    // the refused texture does not take a slot
    assert_eq!(scene.create_texture("textures/ok.png", "ok", &mut uploader).unwrap(), 0);
}

#[test]
fn oversized_scene_texture_does_not_stop_preparation() {
    let assets = TempAssets::new("too-large-scene").with_scene_textures();
    assets.write_image("textures/black_marble.jpg", &rgb_image(64, 2, [0, 0, 0]));
    let mut scene = SceneManager::new(assets.path());
    scene.prepare_scene(&mut FakeUploader::with_max_dimension(16));

    assert_eq!(scene.textures().len(), SCENE_TEXTURES.len() - 1);
    assert_eq!(scene.find_texture_slot("box"), None);
    assert_eq!(scene.find_texture_slot("potBody"), Some(0));
    assert_eq!(scene.materials().len(), 7);
}
