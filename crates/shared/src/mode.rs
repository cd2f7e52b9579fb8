//! Режим взаимодействия и тип гизмо

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Режим взаимодействия редактора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Только выбор, без гизмо
    #[default]
    Action,
    Position,
    Scale,
    Rotation,
}

/// Вид гизмо
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GizmoKind {
    Position,
    Scale,
    Rotation,
}

impl InteractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Action => "action",
            InteractionMode::Position => "position",
            InteractionMode::Scale => "scale",
            InteractionMode::Rotation => "rotation",
        }
    }

    /// Вид гизмо для режима; `None` для режима выбора
    pub fn gizmo_kind(&self) -> Option<GizmoKind> {
        match self {
            InteractionMode::Action => None,
            InteractionMode::Position => Some(GizmoKind::Position),
            InteractionMode::Scale => Some(GizmoKind::Scale),
            InteractionMode::Rotation => Some(GizmoKind::Rotation),
        }
    }

    pub fn all() -> &'static [InteractionMode] {
        &[
            InteractionMode::Action,
            InteractionMode::Position,
            InteractionMode::Scale,
            InteractionMode::Rotation,
        ]
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Неизвестная строка режима
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(pub String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown interaction mode '{}' (expected action, position, scale or rotation)",
            self.0
        )
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for InteractionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "action" => Ok(InteractionMode::Action),
            "position" => Ok(InteractionMode::Position),
            "scale" => Ok(InteractionMode::Scale),
            "rotation" => Ok(InteractionMode::Rotation),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_modes() {
        for mode in InteractionMode::all() {
            let parsed: InteractionMode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, *mode);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "rotate".parse::<InteractionMode>().unwrap_err();
        assert_eq!(err, ParseModeError("rotate".to_string()));
        assert!(err.to_string().contains("rotate"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Position".parse::<InteractionMode>().is_err());
        assert!("".parse::<InteractionMode>().is_err());
    }

    #[test]
    fn test_gizmo_kind_mapping() {
        assert_eq!(InteractionMode::Action.gizmo_kind(), None);
        assert_eq!(InteractionMode::Position.gizmo_kind(), Some(GizmoKind::Position));
        assert_eq!(InteractionMode::Scale.gizmo_kind(), Some(GizmoKind::Scale));
        assert_eq!(InteractionMode::Rotation.gizmo_kind(), Some(GizmoKind::Rotation));
    }

    #[test]
    fn test_serde_matches_display() {
        let json = serde_json::to_string(&InteractionMode::Rotation).unwrap();
        assert_eq!(json, r#""rotation""#);
        assert_eq!(InteractionMode::Rotation.to_string(), "rotation");
    }
}
