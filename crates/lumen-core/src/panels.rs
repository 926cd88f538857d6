//! Side panel routing
//!
//! Exactly one panel is active. Explorer routes the side column to the file
//! tree; every other panel routes it to a read-only view keyed by the id.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of side panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelId {
    #[default]
    Explorer,
    Search,
    SourceControl,
    Debug,
    Extensions,
    Database,
    Terminal,
    Accounts,
    Settings,
}

/// Where a panel's activity button sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Top,
    Bottom,
}

impl PanelId {
    /// Every panel, in activity bar order
    pub const ALL: [PanelId; 9] = [
        PanelId::Explorer,
        PanelId::Search,
        PanelId::SourceControl,
        PanelId::Debug,
        PanelId::Extensions,
        PanelId::Database,
        PanelId::Terminal,
        PanelId::Accounts,
        PanelId::Settings,
    ];

    /// Kebab-case key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            PanelId::Explorer => "explorer",
            PanelId::Search => "search",
            PanelId::SourceControl => "source-control",
            PanelId::Debug => "debug",
            PanelId::Extensions => "extensions",
            PanelId::Database => "database",
            PanelId::Terminal => "terminal",
            PanelId::Accounts => "accounts",
            PanelId::Settings => "settings",
        }
    }

    /// Human-readable title
    pub fn label(&self) -> &'static str {
        match self {
            PanelId::Explorer => "Explorer",
            PanelId::Search => "Search",
            PanelId::SourceControl => "Source Control",
            PanelId::Debug => "Run and Debug",
            PanelId::Extensions => "Extensions",
            PanelId::Database => "Database",
            PanelId::Terminal => "Terminal",
            PanelId::Accounts => "Accounts",
            PanelId::Settings => "Settings",
        }
    }

    /// Keyboard shortcut hint, if the panel has one
    pub fn shortcut(&self) -> Option<&'static str> {
        match self {
            PanelId::Explorer => Some("Ctrl+Shift+E"),
            PanelId::Search => Some("Ctrl+Shift+F"),
            PanelId::SourceControl => Some("Ctrl+Shift+G"),
            PanelId::Debug => Some("Ctrl+Shift+D"),
            PanelId::Extensions => Some("Ctrl+Shift+X"),
            PanelId::Terminal => Some("Ctrl+`"),
            PanelId::Settings => Some("Ctrl+,"),
            PanelId::Database | PanelId::Accounts => None,
        }
    }

    pub fn placement(&self) -> Placement {
        match self {
            PanelId::Accounts | PanelId::Settings => Placement::Bottom,
            _ => Placement::Top,
        }
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PanelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        PanelId::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| format!("unknown panel '{}'", s))
    }
}

/// What the side column shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "panel")]
pub enum SideView {
    /// The navigable file tree
    FileTree,

    /// A static informational view for the given panel
    Info(PanelId),
}

/// Single-selection panel state
#[derive(Debug, Clone, Default)]
pub struct PanelRouter {
    active: PanelId,
}

impl PanelRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch panels. Every transition is valid.
    pub fn select(&mut self, panel: PanelId) {
        if self.active != panel {
            tracing::debug!(from = %self.active, to = %panel, "panel changed");
        }
        self.active = panel;
    }

    pub fn active(&self) -> PanelId {
        self.active
    }

    pub fn is_active(&self, panel: PanelId) -> bool {
        self.active == panel
    }

    /// Route the side column
    pub fn side_view(&self) -> SideView {
        match self.active {
            PanelId::Explorer => SideView::FileTree,
            other => SideView::Info(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_explorer() {
        let router = PanelRouter::new();
        assert_eq!(router.active(), PanelId::Explorer);
        assert_eq!(router.side_view(), SideView::FileTree);
    }

    #[test]
    fn test_select_routes_to_info() {
        let mut router = PanelRouter::new();
        router.select(PanelId::Database);
        assert!(router.is_active(PanelId::Database));
        assert_eq!(router.side_view(), SideView::Info(PanelId::Database));

        router.select(PanelId::Explorer);
        assert_eq!(router.side_view(), SideView::FileTree);
    }

    #[test]
    fn test_parse_round_trips_keys() {
        for panel in PanelId::ALL {
            assert_eq!(panel.key().parse::<PanelId>().unwrap(), panel);
        }
        assert_eq!(" Source-Control ".parse::<PanelId>().unwrap(), PanelId::SourceControl);
        assert!("minimap".parse::<PanelId>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&PanelId::SourceControl).unwrap();
        assert_eq!(json, "\"source-control\"");
    }

    #[test]
    fn test_placement_and_labels() {
        assert_eq!(PanelId::Settings.placement(), Placement::Bottom);
        assert_eq!(PanelId::Terminal.placement(), Placement::Top);
        assert_eq!(PanelId::Debug.label(), "Run and Debug");
        assert_eq!(PanelId::Database.shortcut(), None);
    }
}
