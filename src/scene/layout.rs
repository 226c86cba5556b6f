//! The draw list of the kitchen counter still life.
//!
//! Every entry places one primitive with literal constants. An entry may switch
//! the surface (texture or flat colour) and the material before drawing; when it
//! does not, the values pushed by an earlier entry stay in effect.

use crate::{
    data_structures::shapes::{BoxSide, CylinderParts, Shape},
    scene::transform::Transform,
};

/// What the next draw samples its base colour from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Surface {
    Texture(&'static str),
    Color([f32; 4]),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub label: &'static str,
    pub transform: Transform,
    pub surface: Option<Surface>,
    pub material: Option<&'static str>,
    pub shape: Shape,
}

impl DrawCall {
    pub fn new(label: &'static str, transform: Transform, shape: Shape) -> Self {
        Self {
            label,
            transform,
            surface: None,
            material: None,
            shape,
        }
    }

    pub fn textured(mut self, tag: &'static str) -> Self {
        self.surface = Some(Surface::Texture(tag));
        self
    }

    pub fn colored(mut self, rgba: [f32; 4]) -> Self {
        self.surface = Some(Surface::Color(rgba));
        self
    }

    pub fn material(mut self, tag: &'static str) -> Self {
        self.material = Some(tag);
        self
    }
}

fn place(scale: [f32; 3], rotation_degrees: [f32; 3], position: [f32; 3]) -> Transform {
    Transform::new(scale, rotation_degrees, position)
}

const GLASS: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub fn kitchen_counter() -> Vec<DrawCall> {
    let mut calls = Vec::with_capacity(38);

    // counter top and the tiled wall behind it
    calls.push(
        DrawCall::new("counter", place([20.0, 1.0, 10.0], [0.0; 3], [0.0; 3]), Shape::Plane)
            .textured("counter")
            .material("marble"),
    );
    calls.push(
        DrawCall::new(
            "backsplash",
            place([20.0, 1.0, 10.0], [90.0, 0.0, 0.0], [0.0, 10.0, -10.0]),
            Shape::Plane,
        )
        .textured("backsplash")
        .material("tile"),
    );

    // black tray under the items
    calls.push(
        DrawCall::new(
            "tray",
            place([15.0, 1.0, 9.0], [0.0; 3], [3.0, 1.0, -5.0]),
            Shape::Box,
        )
        .textured("box")
        .material("marble"),
    );

    calls.extend(potted_plant());
    calls.extend(clock());
    calls.extend(salt_shaker(8.7));
    calls.extend(salt_shaker(9.9));
    calls
}

fn potted_plant() -> Vec<DrawCall> {
    let pot = place([3.0, 4.0, 3.0], [0.0; 3], [6.0, 3.0, -4.0]);
    let mut calls = vec![
        DrawCall::new(
            "pot bottom",
            place([3.0, 2.0, 3.0], [0.0; 3], [6.0, 3.0, -4.0]),
            Shape::Sphere,
        )
        .textured("potSphereBottom")
        .material("cement"),
        DrawCall::new(
            "pot dirt",
            pot,
            Shape::Cylinder(CylinderParts {
                top: true,
                bottom: false,
                sides: false,
            }),
        )
        .textured("potDirt")
        .material("dirt"),
        DrawCall::new(
            "pot body",
            pot,
            Shape::Cylinder(CylinderParts {
                top: false,
                bottom: true,
                sides: true,
            }),
        )
        .textured("potBody")
        .material("cement"),
        // lies flat on top of the pot
        DrawCall::new(
            "pot rim",
            place([2.5, 2.6, 2.0], [90.0, 0.0, 0.0], [6.0, 7.0, -4.0]),
            Shape::Torus,
        )
        .textured("potRim")
        .material("cement"),
    ];

    let stems: [([f32; 3], f32, [f32; 3]); 5] = [
        ([0.1, 8.0, 0.1], 0.0, [6.0, 2.0, -4.0]),
        ([0.1, 8.0, 0.1], 10.0, [6.0, 2.0, -4.0]),
        ([0.1, 8.0, 0.1], 10.0, [6.5, 2.0, -4.1]),
        ([0.1, 9.0, 0.1], 10.0, [5.8, 2.0, -3.7]),
        ([0.1, 8.0, 0.1], 10.0, [5.3, 2.0, -3.7]),
    ];
    calls.extend(stems.into_iter().map(|(scale, tilt, position)| {
        DrawCall::new("stem", place(scale, [tilt, 0.0, 0.0], position), Shape::cylinder())
            .textured("stem")
    }));

    let leaves: [([f32; 3], [f32; 3], [f32; 3]); 8] = [
        ([0.3, 0.05, 0.1], [90.0, 0.0, 0.0], [5.8, 7.8, -4.0]),
        ([0.3, 0.05, 0.1], [90.0, 0.0, 0.0], [5.75, 9.1, -4.0]),
        ([0.25, 0.05, 0.1], [90.0, 0.0, 0.0], [5.8, 8.3, -4.0]),
        ([0.3, 0.05, 0.1], [90.0, 0.0, 0.0], [5.8, 9.9, -4.0]),
        ([0.25, 0.05, 0.1], [90.0, 1.0, 0.0], [6.2, 9.8, -4.0]),
        ([0.3, 0.05, 0.1], [90.0, 10.0, 4.0], [6.25, 8.1, -4.0]),
        ([0.25, 0.1, 0.1], [90.0, 10.0, 4.0], [5.8, 8.9, -4.0]),
        ([0.2, 0.05, 0.1], [90.0, 0.0, 4.0], [6.25, 8.5, -4.0]),
    ];
    calls.extend(leaves.into_iter().map(|(scale, rotation, position)| {
        DrawCall::new("leaf", place(scale, rotation, position), Shape::HalfSphere)
            .textured("leaf")
    }));

    calls
}

fn clock() -> Vec<DrawCall> {
    let body = place([3.0, 3.0, 3.0], [0.0; 3], [1.0, 3.0, -3.07]);
    let face = place([3.0, 3.0, 3.0], [0.0; 3], [1.0, 3.0, -3.6]);

    let mut calls: Vec<DrawCall> = [
        BoxSide::Back,
        BoxSide::Top,
        BoxSide::Bottom,
        BoxSide::Left,
        BoxSide::Right,
    ]
    .into_iter()
    .map(|side| {
        DrawCall::new("clock body", body, Shape::BoxSide(side))
            .textured("plastic")
            .material("plastic")
    })
    .collect();

    calls.push(
        DrawCall::new("clock face", face, Shape::BoxSide(BoxSide::Front))
            .colored(WHITE)
            .material("plastic"),
    );
    calls.push(
        DrawCall::new("clock case", face, Shape::Box)
            .textured("plastic")
            .material("plastic"),
    );
    calls.push(
        DrawCall::new(
            "clock centre",
            place([0.2, 0.1, 0.2], [90.0, 0.0, 0.0], [1.0, 3.0, -2.0]),
            Shape::HalfSphere,
        )
        .textured("plastic"),
    );
    calls.push(
        DrawCall::new(
            "hour hand",
            place([0.05, 1.2, 0.05], [0.0; 3], [1.0, 3.1, -2.0]),
            Shape::cylinder(),
        )
        .textured("plastic"),
    );
    calls.push(
        DrawCall::new(
            "minute hand",
            place([0.05, 1.1, 0.05], [90.0, 90.0, 0.0], [1.0, 3.0, -2.0]),
            Shape::cylinder(),
        )
        .textured("plastic"),
    );
    calls
}

/// Glass body and neck with a metal lid, standing on the tray at `x`.
fn salt_shaker(x: f32) -> Vec<DrawCall> {
    vec![
        DrawCall::new(
            "shaker body",
            place([0.5, 1.0, 0.5], [0.0; 3], [x, 1.5, -1.5]),
            Shape::cylinder(),
        )
        .colored(GLASS)
        .material("glass"),
        DrawCall::new(
            "shaker neck",
            place([0.5, 0.5, 0.5], [0.0; 3], [x, 2.5, -1.5]),
            Shape::TaperedCylinder,
        )
        .colored(GLASS)
        .material("glass"),
        DrawCall::new(
            "shaker lid",
            place([0.3, 0.2, 0.2], [0.0; 3], [x, 3.0, -1.5]),
            Shape::cylinder(),
        )
        .textured("metal")
        .material("metal"),
        DrawCall::new(
            "shaker cap",
            place([0.3, 0.2, 0.2], [0.0; 3], [x, 3.2, -1.5]),
            Shape::HalfSphere,
        )
        .textured("metal")
        .material("metal"),
    ]
}
