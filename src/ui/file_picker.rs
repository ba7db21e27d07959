// src/ui/file_picker.rs

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A row in the picker: a path and how deep it sits below the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerNode {
    pub path: PathBuf,
    pub depth: usize,
}

/// Directory tree that lists folders and PDF files.
pub struct FilePicker {
    pub root_path: PathBuf,
    pub expanded: HashSet<PathBuf>,
    pub visible_nodes: Vec<PickerNode>,
    pub selected_index: usize,
}

impl FilePicker {
    pub fn new(root_path: PathBuf) -> Self {
        let mut picker = FilePicker {
            expanded: HashSet::from([root_path.clone()]),
            root_path,
            visible_nodes: Vec::new(),
            selected_index: 0,
        };
        picker.update_visible_nodes();
        picker
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.visible_nodes
            .get(self.selected_index)
            .map(|node| node.path.as_path())
    }

    pub fn toggle_expand(&mut self, path: &Path) {
        if !path.is_dir() {
            return;
        }
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_path_buf());
        }
        self.update_visible_nodes();
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_nodes.len() {
            self.selected_index += 1;
        }
    }

    /// Collapses the selected directory.
    pub fn collapse_selected(&mut self) {
        if let Some(path) = self.selected_path().map(Path::to_path_buf) {
            if self.expanded.remove(&path) {
                self.update_visible_nodes();
            }
        }
    }

    /// Expands the selected directory.
    pub fn expand_selected(&mut self) {
        if let Some(path) = self.selected_path().map(Path::to_path_buf) {
            if path.is_dir() && self.expanded.insert(path) {
                self.update_visible_nodes();
            }
        }
    }

    /// Enter on the current row: directories toggle, files are returned.
    pub fn activate(&mut self) -> Option<PathBuf> {
        let path = self.selected_path()?.to_path_buf();
        if path.is_dir() {
            self.toggle_expand(&path);
            None
        } else {
            Some(path)
        }
    }

    pub fn update_visible_nodes(&mut self) {
        self.visible_nodes = Vec::new();
        let root_path = self.root_path.clone();
        self.traverse(&root_path, 0);
        if self.selected_index >= self.visible_nodes.len() {
            self.selected_index = self.visible_nodes.len().saturating_sub(1);
        }
    }

    fn traverse(&mut self, path: &Path, depth: usize) {
        self.visible_nodes.push(PickerNode {
            path: path.to_path_buf(),
            depth,
        });

        if !self.expanded.contains(path) {
            return;
        }

        let Ok(entries) = fs::read_dir(path) else {
            return;
        };
        let mut children: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| !is_hidden(p) && (p.is_dir() || is_pdf(p)))
            .collect();
        // Folders first, then files, each alphabetically.
        children.sort_by_key(|p| (!p.is_dir(), p.clone()));

        for child in children {
            self.traverse(&child, depth + 1);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .visible_nodes
            .iter()
            .map(|node| {
                let name = if node.depth == 0 {
                    node.path.display().to_string()
                } else {
                    node.path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default()
                };
                let marker = if !node.path.is_dir() {
                    "  "
                } else if self.expanded.contains(&node.path) {
                    "▾ "
                } else {
                    "▸ "
                };
                let style = if node.path.is_dir() {
                    Style::default().fg(Color::LightBlue)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(format!("{}{}{}", "  ".repeat(node.depth), marker, name)).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Select a PDF to upload"),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::LightMagenta)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut state = ListState::default().with_selected(Some(self.selected_index));
        f.render_stateful_widget(list, area, &mut state);
    }
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("pdf"))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.starts_with('.'))
}
