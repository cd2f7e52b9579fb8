use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lang {
    Ru,
    En,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.new" => if ru { "Новая сцена" } else { "New scene" },
        "menu.open" => if ru { "Открыть сцену..." } else { "Open Scene..." },
        "menu.open_title" => if ru { "Открыть JSON сцены" } else { "Open Scene JSON" },
        "menu.save" => if ru { "Сохранить сцену..." } else { "Save Scene..." },
        "menu.save_title" => if ru { "Сохранить JSON сцены" } else { "Save Scene JSON" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.undo" => if ru { "Отменить  Ctrl+Z" } else { "Undo  Ctrl+Z" },
        "menu.redo" => if ru { "Повторить  Ctrl+Shift+Z" } else { "Redo  Ctrl+Shift+Z" },
        "menu.deselect" => if ru { "Снять выделение  Esc" } else { "Deselect  Esc" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.toolbar" => if ru { "Панель режимов" } else { "Mode toolbar" },
        "menu.properties" => if ru { "Свойства" } else { "Properties" },
        "menu.status_bar" => if ru { "Строка состояния" } else { "Status bar" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Modes ───────────────────────────────────────────
        "mode.action" => if ru { "Выбор" } else { "Action" },
        "mode.position" => if ru { "Перемещение" } else { "Position" },
        "mode.scale" => if ru { "Масштаб" } else { "Scale" },
        "mode.rotation" => if ru { "Вращение" } else { "Rotation" },

        "tip.action" => if ru { "Выбор объекта без гизмо  Q" } else { "Pick meshes, no gizmo  Q" },
        "tip.position" => if ru { "Перемещение по осям  W" } else { "Move along an axis  W" },
        "tip.rotation" => if ru { "Вращение вокруг мировых осей  E" } else { "Rotate about world axes  E" },
        "tip.scale" => if ru { "Масштаб по осям или равномерно  R" } else { "Scale per axis or uniformly  R" },

        // ── Status bar ──────────────────────────────────────
        "status.mode" => if ru { "Режим" } else { "Mode" },
        "status.picked" => if ru { "Выбрано" } else { "Picked" },
        "status.ready" => if ru { "Щёлкните по объекту" } else { "Click a mesh to pick it" },
        "status.dragging" => if ru { "Перетаскивание оси" } else { "Dragging axis" },

        // ── Properties ──────────────────────────────────────
        "prop.title" => if ru { "Свойства" } else { "Properties" },
        "prop.pick_mesh" => if ru { "Объект не выбран" } else { "No mesh picked" },
        "prop.not_found" => if ru { "Объект не найден" } else { "Mesh not found" },
        "prop.transform" => if ru { "Трансформация" } else { "Transform" },
        "prop.kind" => if ru { "Тип" } else { "Kind" },
        "prop.material" => if ru { "Материал" } else { "Material" },
        "prop.position" => if ru { "Позиция" } else { "Position" },
        "prop.rotation" => if ru { "Поворот (°)" } else { "Rotation (°)" },
        "prop.scale" => if ru { "Масштаб" } else { "Scale" },
        "prop.light" => if ru { "Освещение" } else { "Light" },
        "prop.light_dir" => if ru { "Направление" } else { "Direction" },
        "prop.light_intensity" => if ru { "Интенсивность" } else { "Intensity" },

        // ── Viewport overlays ───────────────────────────────
        "vp.camera" => if ru { "Камера" } else { "Camera" },
        "vp.click_hint" => if ru {
            "ЛКМ: выбор  |  СКМ/Alt+ЛКМ: вращение  |  ПКМ: сдвиг  |  Колесо: масштаб"
        } else {
            "LMB: pick  |  MMB/Alt+LMB: orbit  |  RMB: pan  |  Scroll: zoom"
        },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },

        "settings.grid" => if ru { "Сетка" } else { "Grid" },
        "settings.grid_visible" => if ru { "Показать сетку" } else { "Show grid" },
        "settings.grid_size" => if ru { "Шаг сетки" } else { "Cell size" },
        "settings.grid_range" => if ru { "Число ячеек" } else { "Cell count" },
        "settings.grid_opacity" => if ru { "Прозрачность" } else { "Opacity" },

        "settings.axes" => if ru { "Оси" } else { "Axes" },
        "settings.axes_visible" => if ru { "Показать оси" } else { "Show axes" },
        "settings.axes_labels" => if ru { "Подписи осей" } else { "Axis labels" },
        "settings.axes_length" => if ru { "Длина осей" } else { "Axis length" },

        "settings.viewport" => if ru { "Вьюпорт" } else { "Viewport" },
        "settings.bg_color" => if ru { "Цвет фона" } else { "Background color" },
        "settings.mesh_color" => if ru { "Цвет объектов" } else { "Mesh color" },

        "settings.gizmo" => if ru { "Гизмо" } else { "Gizmo" },
        "settings.gizmo_size" => if ru { "Размер гизмо" } else { "Gizmo size" },
        "settings.rotation_snap" => if ru { "Шаг поворота (0 = выкл.)" } else { "Rotation snap (0 = off)" },

        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },

        "settings.apply" => if ru { "Применить" } else { "Apply" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}
