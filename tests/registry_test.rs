use cgmath::Vector3;
use still_life::{
    resources::texture::TextureError,
    scene::{
        lights::{LightSetup, MAX_POINT_LIGHTS, PointLight, scene_lights},
        materials::{Material, MaterialRegistry, object_materials},
        textures::{MAX_TEXTURE_SLOTS, TextureRegistry},
    },
};

#[test]
fn texture_slots_are_handed_out_in_order() {
    let mut registry = TextureRegistry::new();
    assert_eq!(registry.register("counter", 'a').unwrap(), 0);
    assert_eq!(registry.register("box", 'b').unwrap(), 1);

    assert_eq!(registry.find_texture_slot("box"), Some(1));
    assert_eq!(registry.find_texture_id("counter"), Some(&'a'));
    assert_eq!(registry.get(1).map(|entry| entry.tag.as_str()), Some("box"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn unknown_texture_tags_resolve_to_none() {
    let mut registry = TextureRegistry::new();
    registry.register("counter", ()).unwrap();

    assert_eq!(registry.find_texture_slot("Counter"), None);
    assert_eq!(registry.find_texture_slot(""), None);
    assert!(registry.find_texture_id("missing").is_none());
}

#[test]
fn duplicate_texture_tags_resolve_to_the_first() {
    let mut registry = TextureRegistry::new();
    registry.register("leaf", "first").unwrap();
    registry.register("leaf", "second").unwrap();

    assert_eq!(registry.find_texture_slot("leaf"), Some(0));
    assert_eq!(registry.find_texture_id("leaf"), Some(&"first"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn texture_registry_refuses_more_than_sixteen_slots() {
    let mut registry = TextureRegistry::new();
    for i in 0..MAX_TEXTURE_SLOTS {
        assert_eq!(registry.register(&format!("t{i}"), i).unwrap(), i);
    }
    assert!(registry.is_full());

    let err = registry.register("one too many", 99).unwrap_err();
    assert!(matches!(err, TextureError::SlotsExhausted(MAX_TEXTURE_SLOTS)));
    assert_eq!(registry.len(), MAX_TEXTURE_SLOTS);
    assert_eq!(registry.find_texture_slot("one too many"), None);
}

#[test]
fn clearing_textures_releases_every_slot() {
    let mut registry = TextureRegistry::new();
    registry.register("a", 1).unwrap();
    registry.register("b", 2).unwrap();
    registry.clear();

    assert!(registry.is_empty());
    assert_eq!(registry.find_texture_slot("a"), None);
    assert_eq!(registry.register("c", 3).unwrap(), 0);
}

#[test]
fn materials_are_found_by_tag() {
    let mut registry = MaterialRegistry::new();
    for material in object_materials() {
        registry.define(material);
    }

    let glass = registry.find_material("glass").unwrap();
    assert_eq!(glass.shininess, 95.0);
    assert_eq!(glass.specular_color, Vector3::new(1.0, 1.0, 1.0));

    let tile = registry.find_material("tile").unwrap();
    assert_eq!(tile.diffuse_color, Vector3::new(0.3, 0.2, 0.1));
    assert!(registry.find_material("wood").is_none());
}

#[test]
fn duplicate_material_tags_resolve_to_the_first() {
    let mut registry = MaterialRegistry::new();
    registry.define(Material::new("metal", [0.1; 3], [0.2; 3], 1.0));
    registry.define(Material::new("metal", [0.9; 3], [0.9; 3], 50.0));

    assert_eq!(registry.find_material("metal").unwrap().shininess, 1.0);
}

#[test]
fn scene_defines_seven_material_presets() {
    let tags: Vec<_> = object_materials().into_iter().map(|m| m.tag).collect();
    assert_eq!(
        tags,
        ["cement", "tile", "marble", "dirt", "metal", "glass", "plastic"]
    );
}

#[test]
fn point_lights_are_capped() {
    let mut lights = LightSetup::new();
    for i in 0..MAX_POINT_LIGHTS {
        assert_eq!(
            lights.add_point_light(PointLight::new([i as f32, 0.0, 0.0], 0.1, 0.1, 0.1)),
            Some(i)
        );
    }
    assert_eq!(
        lights.add_point_light(PointLight::new([9.0, 9.0, 9.0], 1.0, 1.0, 1.0)),
        None
    );
    assert_eq!(lights.point_lights().len(), MAX_POINT_LIGHTS);
}

#[test]
fn scene_lights_fill_the_uniform() {
    let lights = scene_lights();
    assert!(lights.use_lighting);
    assert_eq!(lights.point_lights().len(), 3);

    let uniform = lights.to_uniform();
    assert_eq!(uniform.use_lighting, 1);
    assert_eq!(uniform.directional.active, 1);
    assert_eq!(uniform.directional.direction, [1.0, 1.0, 1.0]);
    assert_eq!(uniform.directional.ambient, [0.52, 0.56, 0.5]);

    assert_eq!(uniform.points[0].position, [-4.0, 8.0, 0.0]);
    assert_eq!(uniform.points[2].position, [3.8, 5.5, 4.0]);
    assert_eq!(uniform.points[2].specular, [0.8; 3]);
    assert!(uniform.points[..3].iter().all(|point| point.active == 1));
    // unused slots stay dark
    assert_eq!(uniform.points[3].active, 0);
}

#[test]
fn default_lighting_is_off() {
    let uniform = LightSetup::new().to_uniform();
    assert_eq!(uniform.use_lighting, 0);
    assert_eq!(uniform.directional.active, 0);
    assert!(uniform.points.iter().all(|point| point.active == 0));
}

#[test]
fn light_uniform_matches_the_shader_layout() {
    use still_life::scene::lights::{DirectionalLightRaw, LightUniform, PointLightRaw};

    assert_eq!(std::mem::size_of::<DirectionalLightRaw>(), 64);
    assert_eq!(std::mem::size_of::<PointLightRaw>(), 64);
    assert_eq!(std::mem::size_of::<LightUniform>(), 64 + 4 * 64 + 16);
}
