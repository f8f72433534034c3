// ABOUTME: Discrete commands the UI layer sends to the layout engine.
// ABOUTME: Serialized as JSON objects tagged by an "op" field.

use serde::{Deserialize, Serialize};
use tabgrid_core::{ClusterKey, IdType, Redistribution, ReorderStrategy, TabIcon, TabId};

use crate::grid::WindowId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    AddTab {
        cluster: ClusterKey,
        #[serde(default)]
        icon: Option<TabIcon>,
        #[serde(default)]
        label: Option<String>,
    },
    RemoveTab {
        tab_id: TabId,
    },
    ReorderTab {
        tab_id: TabId,
        old_index: usize,
        new_index: usize,
    },
    #[serde(alias = "reorderTabsByID")]
    ReorderTabsById {
        tab_id1: TabId,
        tab_id2: TabId,
        strategy: ReorderStrategy,
    },
    ResizeColumns {
        sizes: Vec<u32>,
    },
    ResizeRows {
        sizes: Vec<u32>,
    },
    AddWindow {
        tab_id: TabId,
        row: usize,
        #[serde(default)]
        redistribution: Redistribution,
    },
    RemoveWindow {
        target: String,
        id_type: IdType,
        #[serde(default)]
        redistribution: Redistribution,
    },
    AssignTabToWindow {
        tab_id: TabId,
        window_id: WindowId,
    },
    HandleBrowserResize {
        width: u32,
        height: u32,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddTab { .. } => "addTab",
            Command::RemoveTab { .. } => "removeTab",
            Command::ReorderTab { .. } => "reorderTab",
            Command::ReorderTabsById { .. } => "reorderTabsById",
            Command::ResizeColumns { .. } => "resizeColumns",
            Command::ResizeRows { .. } => "resizeRows",
            Command::AddWindow { .. } => "addWindow",
            Command::RemoveWindow { .. } => "removeWindow",
            Command::AssignTabToWindow { .. } => "assignTabToWindow",
            Command::HandleBrowserResize { .. } => "handleBrowserResize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabgrid_core::Priorities;

    #[test]
    fn parses_add_window_with_priority() {
        let command: Command = serde_json::from_str(
            r#"{"op":"addWindow","tabId":"tab-2","row":1,
                "redistribution":{"strategy":"priority","priorities":"last"}}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            Command::AddWindow {
                tab_id: TabId::from("tab-2"),
                row: 1,
                redistribution: Redistribution::priority(Priorities::LAST),
            }
        );
        assert_eq!(command.name(), "addWindow");
    }

    #[test]
    fn optional_fields_default() {
        let command: Command = serde_json::from_str(r#"{"op":"addTab","cluster":"prod"}"#).unwrap();
        assert_eq!(
            command,
            Command::AddTab {
                cluster: ClusterKey::from("prod"),
                icon: None,
                label: None,
            }
        );

        let command: Command =
            serde_json::from_str(r#"{"op":"removeWindow","target":"win-1","idType":"window"}"#)
                .unwrap();
        assert!(matches!(
            command,
            Command::RemoveWindow {
                id_type: IdType::Window,
                redistribution: Redistribution::Even,
                ..
            }
        ));
    }

    #[test]
    fn field_names_are_camel_case() {
        let command: Command = serde_json::from_str(
            r#"{"op":"reorderTabsById","tabId1":"a","tabId2":"b","strategy":"shift"}"#,
        )
        .unwrap();
        assert_eq!(command.name(), "reorderTabsById");

        let legacy: Command = serde_json::from_str(
            r#"{"op":"reorderTabsByID","tabId1":"a","tabId2":"b","strategy":"swap"}"#,
        )
        .unwrap();
        assert_eq!(legacy.name(), "reorderTabsById");
    }

    #[test]
    fn rejects_unknown_op_and_negative_sizes() {
        assert!(serde_json::from_str::<Command>(r#"{"op":"splitPane"}"#).is_err());
        assert!(serde_json::from_str::<Command>(r#"{"op":"resizeRows","sizes":[100,-5]}"#).is_err());
    }
}
