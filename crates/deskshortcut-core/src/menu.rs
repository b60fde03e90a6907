//! Host menu integration.
//!
//! The host's application context menu exposes this capability so an
//! "Add to Desktop" entry can be placed next to the favorites entries, without the
//! core knowing anything about the host's widget classes.

use crate::config::ShortcutDefaults;

/// A context menu that supports inserting items relative to existing ones.
pub trait ContextMenu {
    /// Labels of the menu's items in order; `None` for separators and items
    /// without a text label.
    fn item_labels(&self) -> Vec<Option<String>>;

    fn append_separator(&mut self);

    fn append_item(&mut self, label: &str);

    /// Insert a labelled item so that it ends up at `index`.
    fn insert_item(&mut self, label: &str, index: usize);
}

/// Where the item ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPlacement {
    /// Inserted right after an anchor item.
    AfterAnchor(usize),
    /// Appended after a new separator.
    Appended,
}

/// Labels used to place the menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLabels {
    pub item: String,
    /// Items the entry is placed after, if any of them is present.
    pub anchors: Vec<String>,
}

impl Default for MenuLabels {
    fn default() -> Self {
        Self {
            item: ShortcutDefaults::MENU_ITEM_LABEL.to_string(),
            anchors: ShortcutDefaults::MENU_ANCHOR_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Add the shortcut entry to `menu`.
///
/// The entry goes directly after the first anchor item; with no anchor present a
/// separator and the entry are appended at the end.
pub fn insert_add_to_desktop(menu: &mut dyn ContextMenu, labels: &MenuLabels) -> MenuPlacement {
    let anchor = menu.item_labels().iter().position(|label| {
        label
            .as_deref()
            .is_some_and(|l| labels.anchors.iter().any(|a| a == l))
    });

    match anchor {
        Some(pos) => {
            menu.insert_item(&labels.item, pos + 1);
            MenuPlacement::AfterAnchor(pos + 1)
        }
        None => {
            menu.append_separator();
            menu.append_item(&labels.item);
            MenuPlacement::Appended
        }
    }
}
