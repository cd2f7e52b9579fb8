use serde::{Deserialize, Serialize};

pub mod mode;

pub use mode::{GizmoKind, InteractionMode, ParseModeError};

/// Уникальный идентификатор узла в сцене
pub type ObjectId = String;

/// Идентификатор земли в сцене по умолчанию
pub const GROUND_ID: &str = "ground";
/// Идентификатор сферы в сцене по умолчанию
pub const SPHERE_ID: &str = "sphere";

/// Тип геометрии меша
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeshKind {
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Sphere {
        diameter: f64,
    },
}

impl MeshKind {
    /// Человекочитаемое имя типа
    pub fn label(&self) -> &'static str {
        match self {
            MeshKind::Box { .. } => "Box",
            MeshKind::Sphere { .. } => "Sphere",
        }
    }
}

/// Трансформация узла (вращение: углы Эйлера XYZ в радианах)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

/// Материал меша
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Диффузный цвет RGB (0.0 - 1.0)
    pub diffuse: [f32; 3],
}

impl Material {
    /// Материал подсветки выбранного меша
    pub fn highlight() -> Self {
        Self {
            name: "color".to_string(),
            diffuse: [0.0, 1.0, 0.0],
        }
    }
}

/// Цвет меша без материала
pub const DEFAULT_DIFFUSE: [f32; 3] = [0.8, 0.8, 0.8];

/// Узел графа сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: ObjectId,
    pub name: String,
    /// Геометрия; `None` означает пустой узел трансформации
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MeshKind>,
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(default = "default_true")]
    pub pickable: bool,
}

fn default_true() -> bool {
    true
}

impl SceneNode {
    /// Меш с геометрией
    pub fn mesh(id: &str, kind: MeshKind, transform: Transform) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            kind: Some(kind),
            transform,
            parent: None,
            material: None,
            pickable: true,
        }
    }

    /// Пустой узел трансформации (не выбирается кликом)
    pub fn transform_node(id: &str, transform: Transform) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            kind: None,
            transform,
            parent: None,
            material: None,
            pickable: false,
        }
    }

    pub fn is_mesh(&self) -> bool {
        self.kind.is_some()
    }

    /// Текущий диффузный цвет
    pub fn diffuse(&self) -> [f32; 3] {
        self.material
            .as_ref()
            .map(|m| m.diffuse)
            .unwrap_or(DEFAULT_DIFFUSE)
    }
}

/// Полусферический источник света
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HemisphericLight {
    pub direction: [f64; 3],
    pub intensity: f64,
}

impl Default for HemisphericLight {
    fn default() -> Self {
        Self {
            direction: [0.0, 1.0, 0.0],
            intensity: 0.5,
        }
    }
}

/// Начальное положение камеры
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub position: [f64; 3],
    pub target: [f64; 3],
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, -6.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Описание сцены
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    pub nodes: Vec<SceneNode>,
    #[serde(default)]
    pub light: HemisphericLight,
    #[serde(default)]
    pub camera: CameraDescription,
}

impl SceneDescription {
    /// Сцена по умолчанию: плита земли 10×1×10 и сфера диаметром 1 над ней
    pub fn default_scene() -> Self {
        Self {
            nodes: vec![
                SceneNode::mesh(
                    GROUND_ID,
                    MeshKind::Box {
                        width: 10.0,
                        height: 1.0,
                        depth: 10.0,
                    },
                    Transform::new(),
                ),
                SceneNode::mesh(
                    SPHERE_ID,
                    MeshKind::Sphere { diameter: 1.0 },
                    Transform::at([0.0, 1.0, 0.0]),
                ),
            ],
            light: HemisphericLight::default(),
            camera: CameraDescription::default(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Узлы с геометрией
    pub fn meshes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|n| n.is_mesh())
    }

    /// Прямые потомки узла
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a SceneNode> + 'a {
        self.nodes
            .iter()
            .filter(move |n| n.parent.as_deref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_kind_serde_tag() {
        let json = serde_json::to_string(&MeshKind::Sphere { diameter: 1.0 }).unwrap();
        assert!(json.contains(r#""type":"sphere""#));
        let back: MeshKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MeshKind::Sphere { diameter: 1.0 });
    }

    #[test]
    fn test_default_scene_layout() {
        let scene = SceneDescription::default_scene();
        assert_eq!(scene.meshes().count(), 2);

        let ground = scene.node(GROUND_ID).unwrap();
        assert_eq!(
            ground.kind,
            Some(MeshKind::Box { width: 10.0, height: 1.0, depth: 10.0 })
        );
        assert_eq!(ground.transform.position, [0.0, 0.0, 0.0]);

        let sphere = scene.node(SPHERE_ID).unwrap();
        assert_eq!(sphere.transform.position, [0.0, 1.0, 0.0]);
        assert!(sphere.material.is_none());
        assert!(sphere.pickable);
    }

    #[test]
    fn test_default_light_and_camera() {
        let scene = SceneDescription::default_scene();
        assert_eq!(scene.light.intensity, 0.5);
        assert_eq!(scene.light.direction, [0.0, 1.0, 0.0]);
        assert_eq!(scene.camera.position, [0.0, 2.0, -6.0]);
    }

    #[test]
    fn test_transform_node_not_pickable() {
        let node = SceneNode::transform_node("pivot", Transform::new());
        assert!(!node.is_mesh());
        assert!(!node.pickable);
    }

    #[test]
    fn test_diffuse_falls_back_to_default() {
        let mut node = SceneNode::mesh(
            "m",
            MeshKind::Sphere { diameter: 1.0 },
            Transform::new(),
        );
        assert_eq!(node.diffuse(), DEFAULT_DIFFUSE);
        node.material = Some(Material::highlight());
        assert_eq!(node.diffuse(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_scene_json_missing_optional_fields() {
        let json = r#"{"nodes": [{"id": "a", "name": "A", "kind": {"type": "box", "width": 1, "height": 1, "depth": 1}, "transform": {"position": [0,0,0], "rotation": [0,0,0], "scale": [1,1,1]}}]}"#;
        let scene: SceneDescription = serde_json::from_str(json).unwrap();
        let node = scene.node("a").unwrap();
        assert!(node.pickable);
        assert!(node.parent.is_none());
        assert_eq!(scene.light, HemisphericLight::default());
    }

    #[test]
    fn test_children_of() {
        let mut scene = SceneDescription::default_scene();
        scene.nodes.push(SceneNode::transform_node("pivot", Transform::new()));
        scene.node_mut(SPHERE_ID).unwrap().parent = Some("pivot".to_string());
        let children: Vec<_> = scene.children_of("pivot").map(|n| n.id.as_str()).collect();
        assert_eq!(children, vec![SPHERE_ID]);
    }
}
