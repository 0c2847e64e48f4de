use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use flatland::math::FreeCoordinate;
use flatland::physics::{Body, Collider, ColliderShape, PhysicsConfig, PhysicsWorld};

/// Serializable description of a scene: its physics configuration and its bodies.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    /// Global physics parameters. Omitted fields take their default values.
    #[serde(default)]
    pub config: PhysicsConfig,

    /// Bodies in insertion order, which is also the order in which collisions are resolved.
    pub bodies: Vec<BodyDescription>,
}

/// Serializable description of one [`Body`] and its optional collider.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct BodyDescription {
    /// Name to register the body under. Duplicates are made unique by the world.
    pub name: String,
    /// Bottom-left corner.
    pub position: [FreeCoordinate; 2],
    /// Width and height.
    #[serde(default = "default_size")]
    pub size: [FreeCoordinate; 2],
    /// Initial velocity, in world units per second.
    #[serde(default)]
    pub velocity: [FreeCoordinate; 2],
    /// See [`Body::linear_drag`].
    #[serde(default)]
    pub linear_drag: FreeCoordinate,
    /// See [`Body::gravity_scale`].
    #[serde(default = "one")]
    pub gravity_scale: FreeCoordinate,
    /// See [`Body::is_static`].
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// See [`Body::is_simulated`].
    #[serde(default = "yes", rename = "simulated")]
    pub is_simulated: bool,
    /// Collider to attach, if any. A body without one never collides.
    #[serde(default)]
    pub collider: Option<ColliderDescription>,
}

/// Serializable description of a [`Collider`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColliderDescription {
    /// Shape of the collision volume.
    #[serde(default)]
    pub shape: ColliderShape,
    /// See [`Collider::local_offset`].
    #[serde(default)]
    pub offset: [FreeCoordinate; 2],
    /// See [`Collider::local_scale`].
    #[serde(default = "ones")]
    pub scale: [FreeCoordinate; 2],
}

fn default_size() -> [FreeCoordinate; 2] {
    let size = flatland::physics::DEFAULT_BODY_SIZE;
    [size.width, size.height]
}
fn one() -> FreeCoordinate {
    1.0
}
fn ones() -> [FreeCoordinate; 2] {
    [1.0, 1.0]
}
fn yes() -> bool {
    true
}

impl SceneDescription {
    /// Reads a scene description from a JSON file.
    pub fn read_from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let file = File::open(path)
            .with_context(|| format!("failed to open scene file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse scene file {}", path.display()))
    }

    /// Constructs a [`PhysicsWorld`] containing the described bodies and colliders.
    pub fn build(&self) -> PhysicsWorld {
        let mut world = PhysicsWorld::new(self.config.clone());
        for description in &self.bodies {
            let handle = world.insert_body(description.name.as_str(), description.to_body());
            if let Some(name) = world.body_name(handle)
                && name.as_str() != description.name
            {
                log::warn!(
                    "body name {:?} is already in use; renamed to {name:?}",
                    description.name
                );
            }

            if let Some(collider) = &description.collider {
                let collider = world.insert_collider(collider.to_collider());
                if let Err(error) = world.attach(handle, collider) {
                    // Both handles were just created, so this cannot happen.
                    log::error!("failed to attach collider: {error}");
                }
            }
        }
        world
    }
}

impl BodyDescription {
    fn to_body(&self) -> Body {
        let mut body = if self.is_static {
            Body::new_static(self.position, self.size)
        } else {
            Body::new(self.position, self.size)
        }
        .with_velocity(self.velocity.into());
        body.linear_drag = self.linear_drag;
        body.gravity_scale = self.gravity_scale;
        body.is_simulated = self.is_simulated;
        body
    }
}

impl ColliderDescription {
    fn to_collider(&self) -> Collider {
        let mut collider = Collider::new_box()
            .with_offset(self.offset.into())
            .with_scale(self.scale.into());
        collider.shape = self.shape;
        collider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatland::euclid::{point2, vec2};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let scene: SceneDescription =
            serde_json::from_str(r#"{"bodies": [{"name": "a", "position": [1, 2]}]}"#).unwrap();
        assert_eq!(scene.config, PhysicsConfig::default());
        assert_eq!(
            scene.bodies,
            vec![BodyDescription {
                name: "a".into(),
                position: [1.0, 2.0],
                size: [100.0, 100.0],
                velocity: [0.0, 0.0],
                linear_drag: 0.0,
                gravity_scale: 1.0,
                is_static: false,
                is_simulated: true,
                collider: None,
            }]
        );
    }

    #[test]
    fn unknown_field_is_an_error() {
        let error = serde_json::from_str::<SceneDescription>(
            r#"{"bodies": [{"name": "a", "position": [1, 2], "mass": 3}]}"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("unknown field `mass`"), "{error}");
    }

    #[test]
    fn build() {
        let scene: SceneDescription = serde_json::from_str(
            r#"{
                "config": {"gravity": 0.0},
                "bodies": [
                    {"name": "wall", "position": [0, 0], "size": [10, 50], "static": true,
                     "collider": {}},
                    {"name": "ball", "position": [20, 5], "size": [4, 4], "velocity": [-1, 0],
                     "linear_drag": 0.5, "collider": {"offset": [1, 1], "scale": [0.5, 0.5]}},
                    {"name": "ball", "position": [40, 5], "simulated": false}
                ]
            }"#,
        )
        .unwrap();
        let world = scene.build();

        assert_eq!(world.config().gravity.into_inner(), 0.0);
        let names: Vec<&str> = world.bodies().map(|(_, name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["wall", "ball", "ball1"]);

        let wall = world.body_by_name("wall").unwrap();
        assert!(world.body(wall).unwrap().is_static);

        let ball = world.body_by_name("ball").unwrap();
        let ball_body = world.body(ball).unwrap();
        assert_eq!(ball_body.velocity, vec2(-1.0, 0.0));
        assert_eq!(ball_body.linear_drag, 0.5);
        let collider = ball_body.collider().unwrap();
        assert_eq!(
            world.collider_sides(collider).unwrap().lower_bounds_p(),
            point2(21.0, 6.0)
        );
        assert_eq!(world.collider_sides(collider).unwrap().size().width, 2.0);

        let ghost = world.body_by_name("ball1").unwrap();
        assert!(!world.body(ghost).unwrap().is_simulated);
        assert_eq!(world.body(ghost).unwrap().collider(), None);
    }
}
