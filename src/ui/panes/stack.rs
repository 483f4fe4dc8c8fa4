//! Stack pane rendering with variables and call frames
//!
//! Shows the global frame followed by each active call. Every variable is
//! listed with its address, name, value and declared type; pointers also show
//! the name of the variable they point at. Cells whose value changed since the
//! previous snapshot are highlighted, which is where a swap becomes visible.

use crate::memory::{stack::Stack, value::Value};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the stack pane
pub struct StackScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Data needed to render the stack pane
pub struct StackRenderData<'a> {
    pub stack: &'a Stack,
    pub previous: Option<&'a Stack>,
    pub source_code: &'a str,
    pub return_value: Option<&'a Value>,
}

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    data: StackRenderData,
    is_focused: bool,
    scroll_state: &mut StackScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Call Stack ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let content_width = area.width.saturating_sub(2) as usize;
    let all_items = build_stack_items(&data, content_width);

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Auto-scroll to the bottom only when content grows
    let max_scroll = total_items.saturating_sub(visible_height);
    if total_items > scroll_state.prev_item_count {
        scroll_state.offset = max_scroll;
    } else {
        scroll_state.offset = scroll_state.offset.min(max_scroll);
    }
    scroll_state.prev_item_count = total_items;

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

fn build_stack_items<'a>(data: &StackRenderData<'a>, content_width: usize) -> Vec<ListItem<'a>> {
    let frames = data.stack.frames();
    let mut items = Vec::new();

    for (depth, stack_frame) in frames.iter().enumerate() {
        items.push(ListItem::new(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(
                format!("Frame {} ", depth),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled("│ ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                if depth == 0 {
                    stack_frame.function_name.clone()
                } else {
                    format!("{}()", stack_frame.function_name)
                },
                Style::default()
                    .fg(DEFAULT_THEME.function)
                    .add_modifier(Modifier::BOLD),
            ),
        ])));

        // Call site in the caller
        if let Some(loc) = &stack_frame.return_location {
            let call_site = data
                .source_code
                .lines()
                .nth(loc.line.saturating_sub(1))
                .unwrap_or("???")
                .trim();
            let caller = depth
                .checked_sub(1)
                .and_then(|d| frames.get(d))
                .map_or("?", |f| f.function_name.as_str());
            items.push(ListItem::new(Line::from(vec![
                Span::styled("  ↪ ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(caller.to_string(), Style::default().fg(DEFAULT_THEME.muted_function)),
                Span::styled(" → ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(call_site.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
            ])));
        }

        for (cell, value) in data.stack.frame_cells(depth) {
            let changed = data
                .previous
                .is_some_and(|prev| prev.value_at(cell.address) != Some(value));
            let row_style = if changed {
                Style::default().bg(DEFAULT_THEME.changed_bg)
            } else {
                Style::default()
            };

            let addr_text = format!("0x{:08x} ", cell.address);
            let value_text = data.stack.describe(&value);
            let type_text = cell.var_type.to_string();

            let value_style = match value {
                Value::Uninitialized => Style::default().fg(DEFAULT_THEME.error),
                Value::Int(_) => Style::default().fg(DEFAULT_THEME.number),
                Value::Pointer(_) | Value::Null => Style::default().fg(DEFAULT_THEME.secondary),
            };

            let left_width = addr_text.chars().count()
                + cell.name.chars().count()
                + 3
                + value_text.chars().count();
            let padding = content_width.saturating_sub(left_width + type_text.len());

            let line = Line::from(vec![
                Span::styled(addr_text, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    format!("{} ", cell.name),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::styled(": ", Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(value_text, value_style),
                Span::raw(" ".repeat(padding)),
                Span::styled(type_text, Style::default().fg(DEFAULT_THEME.type_name)),
            ]);
            items.push(ListItem::new(line).style(row_style));
        }

        // Return value belongs to the innermost frame
        if depth + 1 == frames.len() && depth > 0 {
            if let Some(ret_val) = data.return_value {
                items.push(ListItem::new(Line::from(vec![
                    Span::styled(
                        "     ↖ return: ",
                        Style::default()
                            .fg(DEFAULT_THEME.return_value)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        data.stack.describe(ret_val),
                        Style::default().fg(DEFAULT_THEME.return_value),
                    ),
                ])));
            }
        }

        if depth + 1 < frames.len() {
            items.push(ListItem::new(Line::from("")));
        }
    }

    items
}
