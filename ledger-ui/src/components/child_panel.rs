//! Child panel area: a tab strip of open views and the body of the one in
//! front.
//!
//! The bodies are layout skeletons only. Each view kind lists its controls
//! as capability-tagged nodes, the core themer styles the tree and this
//! module draws the result.

use gpui::{
    AnyElement, Context, FontWeight, InteractiveElement, IntoElement, ParentElement, Pixels,
    SharedString, StatefulInteractiveElement, Styled, div, prelude::FluentBuilder, px,
};
use gpui_component::{h_flex, v_flex};
use ledger_core::{
    SingletonKind, TransientKind, ViewKind,
    theme::{ControlKind, ControlNode, Palette, TableStyle, ThemedNode, apply_theme},
};

use super::make_button;
use crate::{
    app::LedgerShell,
    host::ChildPanel,
    themes::hsla,
};

/// A control in a panel layout together with its caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub kind: ControlKind,
    pub caption: &'static str,
    pub children: Vec<Skeleton>,
}

impl Skeleton {
    fn leaf(
        kind: ControlKind,
        caption: &'static str,
    ) -> Self {
        Self {
            kind,
            caption,
            children: Vec::new(),
        }
    }

    fn group(
        kind: ControlKind,
        caption: &'static str,
        children: Vec<Skeleton>,
    ) -> Self {
        Self {
            kind,
            caption,
            children,
        }
    }

    pub fn to_control(&self) -> ControlNode {
        ControlNode::with_children(
            self.kind,
            self.children.iter().map(Skeleton::to_control).collect(),
        )
    }
}

fn field(
    caption: &'static str,
    input: ControlKind,
) -> [Skeleton; 2] {
    [
        Skeleton::leaf(ControlKind::Label, caption),
        Skeleton::leaf(input, caption),
    ]
}

fn entry_form(recurring: bool) -> Skeleton {
    use ControlKind::*;

    let mut fields = Vec::new();
    fields.extend(field("Amount", TextInput));
    fields.extend(field("Category", ChoiceInput));
    fields.extend(field("Payment Method", ChoiceInput));
    fields.extend(field("Comment", TextInput));
    if recurring {
        fields.extend(field("Start Date", TextInput));
        fields.extend(field("End Date", TextInput));
    } else {
        fields.extend(field("Date", TextInput));
    }

    Skeleton::group(
        Container,
        "",
        vec![
            Skeleton::group(Grouping, "Details", fields),
            Skeleton::leaf(Button, "Save"),
        ],
    )
}

fn category_browser() -> Skeleton {
    use ControlKind::*;

    let mut editor = Vec::new();
    editor.extend(field("Name", TextInput));
    editor.extend(field("Description", TextInput));
    editor.push(Skeleton::leaf(Button, "Add"));

    Skeleton::group(
        Container,
        "",
        vec![
            Skeleton::leaf(TabularDisplay, "Categories"),
            Skeleton::group(Grouping, "Edit", editor),
        ],
    )
}

fn chart(filters: &[&'static str]) -> Skeleton {
    use ControlKind::*;

    let mut controls = Vec::new();
    for &caption in filters {
        controls.extend(field(caption, ChoiceInput));
    }

    Skeleton::group(
        Container,
        "",
        vec![
            Skeleton::group(Grouping, "Filter", controls),
            Skeleton::leaf(Label, "Chart"),
        ],
    )
}

/// Control layout drawn for a view kind.
pub fn skeleton_for(kind: ViewKind) -> Skeleton {
    match kind {
        ViewKind::Singleton(kind) => match kind {
            SingletonKind::NewIncome | SingletonKind::NewExpense => entry_form(false),
            SingletonKind::NewRecurringIncome | SingletonKind::NewRecurringExpense => {
                entry_form(true)
            }
            SingletonKind::ExpenseCategory
            | SingletonKind::IncomeCategory
            | SingletonKind::PaymentCategory => category_browser(),
        },
        ViewKind::Transient(kind) => match kind {
            TransientKind::DetailView => Skeleton::group(
                ControlKind::Container,
                "",
                vec![
                    Skeleton::group(
                        ControlKind::Grouping,
                        "Month",
                        field("Month", ControlKind::ChoiceInput).into(),
                    ),
                    Skeleton::leaf(ControlKind::TabularDisplay, "Entries"),
                ],
            ),
            TransientKind::CategoryGraph => chart(&["Category", "Year"]),
            TransientKind::MultipleCategoryCompare => chart(&["Categories", "From", "To"]),
            TransientKind::CategoryPieChart | TransientKind::PaymentMethodChart => {
                chart(&["Month"])
            }
        },
    }
}

fn render_control(
    skeleton: &Skeleton,
    themed: &ThemedNode,
    palette: &Palette,
) -> AnyElement {
    let style = themed.style;
    let children = skeleton
        .children
        .iter()
        .zip(&themed.children)
        .map(|(s, t)| render_control(s, t, palette))
        .collect::<Vec<_>>();

    let border = hsla(palette.border);
    let base = div()
        .bg(hsla(style.background))
        .text_color(hsla(style.foreground))
        .when(!style.flat && !style.bordered, |this| {
            this.border_1().border_color(border)
        });

    match themed.kind {
        ControlKind::Container => v_flex().gap_3().children(children).into_any_element(),
        ControlKind::Grouping => v_flex()
            .gap_1()
            .p_3()
            .border_1()
            .border_color(border)
            .text_color(hsla(style.foreground))
            .child(div().font_weight(FontWeight::BOLD).child(skeleton.caption))
            .children(children)
            .into_any_element(),
        ControlKind::Label => base
            .text_size(points(style.font_size.unwrap_or(palette.font_size)))
            .child(skeleton.caption)
            .into_any_element(),
        ControlKind::TextInput | ControlKind::ChoiceInput => {
            let marker = if themed.kind == ControlKind::ChoiceInput {
                " \u{25be}"
            } else {
                ""
            };
            base.h(px(26.))
                .px_2()
                .when(style.bordered, |this| this.border_1().border_color(border))
                .text_color(hsla(palette.muted_text))
                .child(format!("{}{marker}", skeleton.caption.to_lowercase()))
                .into_any_element()
        }
        ControlKind::Button => base
            .px_4()
            .py_1()
            .w(px(120.))
            .child(skeleton.caption)
            .into_any_element(),
        ControlKind::TabularDisplay => {
            let table = style.table.unwrap_or(TableStyle {
                header_background: palette.button,
                cell_background: palette.input,
                selection_background: palette.selection,
            });
            let header = h_flex()
                .bg(hsla(table.header_background))
                .px_2()
                .child(skeleton.caption);
            let rows = (0..3).map(|row| {
                let background = if row == 0 {
                    table.selection_background
                } else {
                    table.cell_background
                };
                div().h(px(22.)).bg(hsla(background))
            });
            v_flex()
                .border_1()
                .border_color(border)
                .child(header)
                .children(rows)
                .into_any_element()
        }
    }
}

fn points(size: f32) -> Pixels {
    px(size * 4.0 / 3.0)
}

fn render_tab(
    panel: &ChildPanel,
    in_front: bool,
    palette: &Palette,
    cx: &mut Context<LedgerShell>,
) -> impl IntoElement + use<> {
    let handle = panel.handle;
    let background = if in_front {
        palette.button
    } else {
        palette.window
    };
    div()
        .id(SharedString::from(format!("panel-tab-{}", handle.raw())))
        .px_3()
        .py_1()
        .cursor_pointer()
        .bg(hsla(background))
        .when(in_front, |this| this.font_weight(FontWeight::BOLD))
        .on_click(cx.listener(move |this, _, _, cx| this.focus_panel(handle, cx)))
        .child(panel.title())
}

pub fn render_child_area(
    shell: &LedgerShell,
    cx: &mut Context<LedgerShell>,
) -> impl IntoElement {
    let palette = shell.palette();
    let host = shell.workspace().host();

    let Some(front) = host.front() else {
        return div()
            .flex_1()
            .flex()
            .items_center()
            .justify_center()
            .text_color(hsla(palette.muted_text))
            .child("No windows open")
            .into_any_element();
    };

    let mut ordered = host.panels().iter().collect::<Vec<_>>();
    ordered.sort_by_key(|panel| panel.handle);
    let tabs = ordered
        .into_iter()
        .map(|panel| render_tab(panel, panel.handle == front.handle, palette, cx))
        .collect::<Vec<_>>();

    let skeleton = skeleton_for(front.kind);
    let themed = apply_theme(&skeleton.to_control(), palette);
    let handle = front.handle;

    v_flex()
        .flex_1()
        .overflow_hidden()
        .child(
            h_flex()
                .w_full()
                .border_b_1()
                .border_color(hsla(palette.border))
                .children(tabs),
        )
        .child(
            v_flex()
                .flex_1()
                .p_4()
                .gap_3()
                .child(
                    h_flex()
                        .items_center()
                        .justify_between()
                        .child(
                            div()
                                .text_lg()
                                .font_weight(FontWeight::BOLD)
                                .child(front.title()),
                        )
                        .child(make_button(
                            SharedString::from(format!("panel-close-{}", handle.raw())),
                            "Close",
                            cx.listener(move |this, _, _, cx| this.close_panel(handle, cx)),
                        )),
                )
                .child(render_control(&skeleton, &themed, palette)),
        )
        .into_any_element()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn count(skeleton: &Skeleton) -> usize {
        1 + skeleton.children.iter().map(count).sum::<usize>()
    }

    #[test]
    fn every_kind_has_a_layout_matching_its_control_tree() {
        let kinds = SingletonKind::ALL
            .into_iter()
            .map(ViewKind::from)
            .chain(TransientKind::ALL.into_iter().map(ViewKind::from));
        for kind in kinds {
            let skeleton = skeleton_for(kind);
            let themed = apply_theme(&skeleton.to_control(), &Palette::dark());
            assert_eq!(themed.count(), count(&skeleton), "{kind}");
        }
    }

    #[test]
    fn recurring_forms_ask_for_a_date_range() {
        let captions = |kind: SingletonKind| -> Vec<&'static str> {
            skeleton_for(kind.into()).children[0]
                .children
                .iter()
                .filter(|s| s.kind == ControlKind::Label)
                .map(|s| s.caption)
                .collect()
        };

        assert!(captions(SingletonKind::NewRecurringIncome).contains(&"Start Date"));
        assert!(!captions(SingletonKind::NewIncome).contains(&"Start Date"));
    }

    #[test]
    fn category_browsers_show_a_table() {
        let skeleton = skeleton_for(SingletonKind::PaymentCategory.into());
        assert_eq!(skeleton.children[0].kind, ControlKind::TabularDisplay);
    }
}
