//! Dark colour scheme and the recursive control themer.
//!
//! Controls are described by capability tags rather than concrete widget
//! types; [`apply_theme`] walks a [`ControlNode`] tree and styles each node
//! with the themer for its tag.

use std::fmt;

use crate::navigation::Highlight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(
        r: u8,
        g: u8,
        b: u8,
    ) -> Self {
        Self { r, g, b }
    }

    /// Packed `0xRRGGBB`.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub window: Rgb,
    pub button: Rgb,
    pub input: Rgb,
    pub selection: Rgb,
    pub hover: Rgb,
    pub menu_strip: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub muted_text: Rgb,
    pub font_size: f32,
    pub label_font_size: f32,
}

impl Palette {
    pub const fn dark() -> Self {
        Self {
            window: Rgb::new(45, 45, 48),
            button: Rgb::new(35, 35, 38),
            input: Rgb::new(30, 30, 30),
            selection: Rgb::new(70, 70, 70),
            hover: Rgb::new(60, 60, 60),
            menu_strip: Rgb::new(28, 28, 28),
            border: Rgb::new(62, 62, 66),
            text: Rgb::new(255, 255, 255),
            muted_text: Rgb::new(220, 220, 220),
            font_size: 10.0,
            label_font_size: 9.0,
        }
    }

    /// Style of a top menu-bar item.
    pub fn menu_item_style(
        &self,
        highlight: Highlight,
    ) -> MenuItemStyle {
        match highlight {
            Highlight::Active => MenuItemStyle {
                foreground: self.text,
                background: self.selection,
                hover_background: self.selection,
                bold: true,
            },
            Highlight::Normal => MenuItemStyle {
                foreground: self.muted_text,
                background: self.menu_strip,
                hover_background: self.hover,
                bold: false,
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItemStyle {
    pub foreground: Rgb,
    pub background: Rgb,
    pub hover_background: Rgb,
    pub bold: bool,
}

/// What a control can do, as far as theming cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Container,
    Button,
    TextInput,
    ChoiceInput,
    TabularDisplay,
    Label,
    Grouping,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlNode {
    pub kind: ControlKind,
    pub children: Vec<ControlNode>,
}

impl ControlNode {
    pub fn leaf(kind: ControlKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(
        kind: ControlKind,
        children: Vec<ControlNode>,
    ) -> Self {
        Self { kind, children }
    }
}

/// Colours for the header, body and selected cells of a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub header_background: Rgb,
    pub cell_background: Rgb,
    pub selection_background: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlStyle {
    pub background: Rgb,
    pub foreground: Rgb,
    pub flat: bool,
    pub bordered: bool,
    pub font_size: Option<f32>,
    pub table: Option<TableStyle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemedNode {
    pub kind: ControlKind,
    pub style: ControlStyle,
    pub children: Vec<ThemedNode>,
}

impl ThemedNode {
    /// Number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ThemedNode::count).sum::<usize>()
    }
}

pub fn apply_theme(
    node: &ControlNode,
    palette: &Palette,
) -> ThemedNode {
    let base = ControlStyle {
        background: palette.window,
        foreground: palette.text,
        flat: false,
        bordered: false,
        font_size: None,
        table: None,
    };
    let style = match node.kind {
        ControlKind::Container => theme_container(base, palette),
        ControlKind::Button => theme_button(base, palette),
        ControlKind::TextInput => theme_text_input(base, palette),
        ControlKind::ChoiceInput => theme_choice_input(base, palette),
        ControlKind::TabularDisplay => theme_table(base, palette),
        ControlKind::Label => theme_label(base, palette),
        ControlKind::Grouping => theme_grouping(base, palette),
    };

    ThemedNode {
        kind: node.kind,
        style,
        children: node
            .children
            .iter()
            .map(|child| apply_theme(child, palette))
            .collect(),
    }
}

fn theme_container(
    style: ControlStyle,
    palette: &Palette,
) -> ControlStyle {
    ControlStyle {
        background: palette.window,
        ..style
    }
}

fn theme_button(
    style: ControlStyle,
    palette: &Palette,
) -> ControlStyle {
    ControlStyle {
        background: palette.button,
        flat: true,
        ..style
    }
}

fn theme_text_input(
    style: ControlStyle,
    palette: &Palette,
) -> ControlStyle {
    ControlStyle {
        background: palette.input,
        bordered: true,
        ..style
    }
}

fn theme_choice_input(
    style: ControlStyle,
    palette: &Palette,
) -> ControlStyle {
    ControlStyle {
        background: palette.input,
        flat: true,
        ..style
    }
}

fn theme_table(
    style: ControlStyle,
    palette: &Palette,
) -> ControlStyle {
    ControlStyle {
        table: Some(TableStyle {
            header_background: palette.button,
            cell_background: palette.input,
            selection_background: palette.selection,
        }),
        ..style
    }
}

fn theme_label(
    style: ControlStyle,
    palette: &Palette,
) -> ControlStyle {
    ControlStyle {
        font_size: Some(palette.label_font_size),
        ..style
    }
}

fn theme_grouping(
    style: ControlStyle,
    _palette: &Palette,
) -> ControlStyle {
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry_form() -> ControlNode {
        ControlNode::with_children(
            ControlKind::Container,
            vec![
                ControlNode::with_children(
                    ControlKind::Grouping,
                    vec![
                        ControlNode::leaf(ControlKind::Label),
                        ControlNode::leaf(ControlKind::TextInput),
                        ControlNode::leaf(ControlKind::ChoiceInput),
                    ],
                ),
                ControlNode::leaf(ControlKind::TabularDisplay),
                ControlNode::leaf(ControlKind::Button),
            ],
        )
    }

    #[test]
    fn theme_reaches_every_node() {
        let themed = apply_theme(&entry_form(), &Palette::dark());
        assert_eq!(themed.count(), 7);
        assert_eq!(themed.children[0].children[1].kind, ControlKind::TextInput);
    }

    #[test]
    fn inputs_use_the_input_background() {
        let palette = Palette::dark();
        let themed = apply_theme(&entry_form(), &palette);
        let group = &themed.children[0];

        assert_eq!(group.children[1].style.background, palette.input);
        assert!(group.children[1].style.bordered);
        assert_eq!(group.children[2].style.background, palette.input);
        assert!(group.children[2].style.flat);
        assert_eq!(group.children[0].style.font_size, Some(9.0));
    }

    #[test]
    fn tables_get_header_cell_and_selection_colours() {
        let palette = Palette::dark();
        let themed = apply_theme(&ControlNode::leaf(ControlKind::TabularDisplay), &palette);
        assert_eq!(
            themed.style.table,
            Some(TableStyle {
                header_background: Rgb::new(35, 35, 38),
                cell_background: Rgb::new(30, 30, 30),
                selection_background: Rgb::new(70, 70, 70),
            })
        );
        assert_eq!(themed.style.background, palette.window);
    }

    #[test]
    fn active_menu_item_is_bold_on_the_selection_colour() {
        let palette = Palette::dark();
        let active = palette.menu_item_style(Highlight::Active);
        let normal = palette.menu_item_style(Highlight::Normal);

        assert!(active.bold);
        assert_eq!(active.background, palette.selection);
        assert!(!normal.bold);
        assert_eq!(normal.foreground, Rgb::new(220, 220, 220));
        assert_eq!(normal.hover_background, palette.hover);
    }

    #[test]
    fn rgb_formats_as_hex() {
        assert_eq!(Rgb::new(45, 45, 48).to_string(), "#2d2d30");
        assert_eq!(Rgb::new(45, 45, 48).to_hex(), 0x2d2d30);
    }
}
