//! Application registry: the closed app id set and per-app descriptors.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppId {
    FileManager,
    TextEditor,
    CodeEditor,
    Browser,
    ImageViewer,
    VideoPlayer,
    MusicPlayer,
    Paint,
    Terminal,
    Calculator,
    Clock,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub app: AppId,
    pub name: &'static str,
    pub icon_id: &'static str,
    pub default_width: i32,
    pub default_height: i32,
    /// Whether a second `open` for the same app (and file) creates a new
    /// window instead of focusing the existing one.
    pub multi_instance: bool,
}

const APP_REGISTRY: [AppDescriptor; 12] = [
    AppDescriptor {
        app: AppId::FileManager,
        name: "Files",
        icon_id: "folder",
        default_width: 800,
        default_height: 550,
        multi_instance: true,
    },
    AppDescriptor {
        app: AppId::TextEditor,
        name: "Notes",
        icon_id: "file-text",
        default_width: 600,
        default_height: 450,
        multi_instance: false,
    },
    AppDescriptor {
        app: AppId::CodeEditor,
        name: "Code",
        icon_id: "code",
        default_width: 900,
        default_height: 600,
        multi_instance: false,
    },
    AppDescriptor {
        app: AppId::Browser,
        name: "Web",
        icon_id: "globe",
        default_width: 1000,
        default_height: 650,
        multi_instance: true,
    },
    AppDescriptor {
        app: AppId::ImageViewer,
        name: "Photos",
        icon_id: "image",
        default_width: 600,
        default_height: 500,
        multi_instance: false,
    },
    AppDescriptor {
        app: AppId::VideoPlayer,
        name: "Player",
        icon_id: "monitor-play",
        default_width: 800,
        default_height: 500,
        multi_instance: false,
    },
    AppDescriptor {
        app: AppId::MusicPlayer,
        name: "Groove",
        icon_id: "music",
        default_width: 350,
        default_height: 500,
        multi_instance: false,
    },
    AppDescriptor {
        app: AppId::Paint,
        name: "Canvas",
        icon_id: "palette",
        default_width: 800,
        default_height: 600,
        multi_instance: false,
    },
    AppDescriptor {
        app: AppId::Terminal,
        name: "Term",
        icon_id: "terminal",
        default_width: 600,
        default_height: 400,
        multi_instance: false,
    },
    AppDescriptor {
        app: AppId::Calculator,
        name: "Calc",
        icon_id: "calculator",
        default_width: 320,
        default_height: 480,
        multi_instance: false,
    },
    AppDescriptor {
        app: AppId::Clock,
        name: "Time",
        icon_id: "clock",
        default_width: 300,
        default_height: 450,
        multi_instance: false,
    },
    AppDescriptor {
        app: AppId::Settings,
        name: "Settings",
        icon_id: "settings",
        default_width: 700,
        default_height: 500,
        multi_instance: false,
    },
];

pub fn app_registry() -> &'static [AppDescriptor] {
    &APP_REGISTRY
}

/// Descriptor lookup; the exhaustive match keeps the table and the closed
/// [`AppId`] set in lockstep at compile time.
pub fn descriptor(app: AppId) -> &'static AppDescriptor {
    match app {
        AppId::FileManager => &APP_REGISTRY[0],
        AppId::TextEditor => &APP_REGISTRY[1],
        AppId::CodeEditor => &APP_REGISTRY[2],
        AppId::Browser => &APP_REGISTRY[3],
        AppId::ImageViewer => &APP_REGISTRY[4],
        AppId::VideoPlayer => &APP_REGISTRY[5],
        AppId::MusicPlayer => &APP_REGISTRY[6],
        AppId::Paint => &APP_REGISTRY[7],
        AppId::Terminal => &APP_REGISTRY[8],
        AppId::Calculator => &APP_REGISTRY[9],
        AppId::Clock => &APP_REGISTRY[10],
        AppId::Settings => &APP_REGISTRY[11],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_app_id() {
        for app in [
            AppId::FileManager,
            AppId::TextEditor,
            AppId::CodeEditor,
            AppId::Browser,
            AppId::ImageViewer,
            AppId::VideoPlayer,
            AppId::MusicPlayer,
            AppId::Paint,
            AppId::Terminal,
            AppId::Calculator,
            AppId::Clock,
            AppId::Settings,
        ] {
            assert_eq!(descriptor(app).app, app);
        }
    }

    #[test]
    fn only_browser_and_file_manager_allow_multiple_instances() {
        let multi: Vec<AppId> = app_registry()
            .iter()
            .filter(|d| d.multi_instance)
            .map(|d| d.app)
            .collect();
        assert_eq!(multi, vec![AppId::FileManager, AppId::Browser]);
    }

    #[test]
    fn app_id_serde_values_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&AppId::FileManager).expect("serialize"),
            "\"file-manager\""
        );
        let app: AppId = serde_json::from_str("\"text-editor\"").expect("deserialize");
        assert_eq!(app, AppId::TextEditor);
    }
}
