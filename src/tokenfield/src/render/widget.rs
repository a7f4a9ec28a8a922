//! Token field widget.
//!
//! Draws the selected tokens as chips with the text entry sitting in the gap
//! chosen by the cursor, and the candidate dropdown underneath.
//!
//! ```text
//! Red × Blue × gr█
//! ╭────────────────────────╮
//! │> Green                 │
//! │  Grey                  │
//! ╰────────────────────────╯
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Widget};

use crate::collaborator::TextMeasure;
use crate::controller::InteractionController;

use super::measure::UnicodeMeasure;
use super::scroll::{ScrollState, render_scrollbar};
use super::theme::ColorScheme;

/// Columns between two chips.
const CHIP_GAP: usize = 1;

/// Columns a chip adds around its text: a space and the remove mark.
const CHIP_CHROME: usize = 2;

const REMOVE_MARK: &str = "×";

/// Dropdown labels start after the highlight marker and a space.
const ROW_INDENT: u16 = 2;

/// What a screen position points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The body of a token chip.
    Token(usize),
    /// The remove mark of a token chip.
    RemoveToken(usize),
    /// A candidate option row.
    Row(usize),
    /// The "add custom value" row.
    CustomRow,
    /// The text entry.
    TextEntry,
    /// Empty space inside the control.
    Field,
}

/// Screen placement of one chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSlot {
    /// Index of the token in the selection.
    pub index: usize,
    /// Full chip, remove mark included.
    pub rect: Rect,
    /// The remove mark cell.
    pub remove: Rect,
}

/// Where everything lands for a given area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    /// Area the control was laid out in.
    pub area: Rect,
    /// Token lines in use.
    pub lines: u16,
    /// Chips that fit, in selection order.
    pub chips: Vec<ChipSlot>,
    /// The text entry, if it fits.
    pub entry: Option<Rect>,
    /// Dropdown frame, borders included.
    pub dropdown: Option<Rect>,
    /// Visible dropdown rows as (row index, area).
    pub rows: Vec<(usize, Rect)>,
    custom_row: Option<usize>,
    window: Option<ScrollState>,
}

#[derive(Debug, Clone, Copy)]
enum Piece {
    Chip { index: usize, width: usize },
    Entry { width: usize },
}

impl Piece {
    fn width(&self) -> usize {
        match self {
            Piece::Chip { width, .. } | Piece::Entry { width } => *width,
        }
    }
}

fn pieces(controller: &InteractionController, max_width: usize) -> Vec<Piece> {
    let tokens = controller.selected();
    let gap = (controller.cursor() + 1).clamp(0, tokens.len() as isize) as usize;
    let chip = |index: usize| Piece::Chip {
        index,
        width: (UnicodeMeasure.measure_text_width(&tokens[index]) + CHIP_CHROME).min(max_width),
    };

    let mut out = Vec::with_capacity(tokens.len() + 1);
    out.extend((0..gap).map(&chip));
    out.push(Piece::Entry {
        width: controller.entry_width(&UnicodeMeasure).min(max_width),
    });
    out.extend((gap..tokens.len()).map(&chip));
    out
}

impl FieldLayout {
    /// Lay the control out in `area`.
    pub fn compute(controller: &InteractionController, scroll: &ScrollState, area: Rect) -> Self {
        let mut layout = Self {
            area,
            lines: 0,
            chips: Vec::new(),
            entry: None,
            dropdown: None,
            rows: Vec::new(),
            custom_row: None,
            window: None,
        };
        if area.width == 0 || area.height == 0 {
            return layout;
        }

        let pieces = pieces(controller, area.width as usize);
        let max_lines = controller.config().max_lines.clamp(1, area.height as usize) as u16;
        if max_lines == 1 {
            layout.place_single_line(&pieces);
        } else {
            layout.place_wrapped(&pieces, max_lines);
        }
        layout.place_dropdown(controller, scroll);
        layout
    }

    /// The token lines.
    pub fn field(&self) -> Rect {
        Rect::new(self.area.x, self.area.y, self.area.width, self.lines)
    }

    /// Check if a position is anywhere on the control.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let pos = Position::new(column, row);
        self.field().contains(pos) || self.dropdown.is_some_and(|d| d.contains(pos))
    }

    /// Resolve a screen position.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Hit> {
        let pos = Position::new(column, row);
        for chip in &self.chips {
            if chip.remove.contains(pos) {
                return Some(Hit::RemoveToken(chip.index));
            }
            if chip.rect.contains(pos) {
                return Some(Hit::Token(chip.index));
            }
        }
        if self.entry.is_some_and(|e| e.contains(pos)) {
            return Some(Hit::TextEntry);
        }
        if let Some((index, _)) = self.rows.iter().find(|(_, r)| r.contains(pos)) {
            if self.custom_row == Some(*index) {
                return Some(Hit::CustomRow);
            }
            return Some(Hit::Row(*index));
        }
        self.contains(column, row).then_some(Hit::Field)
    }

    // Keeps the entry on screen by shifting the whole line left.
    fn place_single_line(&mut self, pieces: &[Piece]) {
        let width = self.area.width as usize;
        let mut x: usize = 0;
        let mut entry_end: usize = 0;
        let mut placed = Vec::with_capacity(pieces.len());
        for piece in pieces {
            if let Piece::Entry { width: w } = piece {
                entry_end = x + w;
            }
            placed.push((*piece, x));
            x += piece.width() + CHIP_GAP;
        }

        let shift = entry_end.saturating_sub(width);
        for (piece, start) in placed {
            if start < shift || start + piece.width() > shift + width {
                continue;
            }
            self.place(piece, start - shift, 0);
        }
        self.lines = 1;
    }

    // Wraps onto at most `max_lines`, keeping the entry's line visible.
    fn place_wrapped(&mut self, pieces: &[Piece], max_lines: u16) {
        let width = self.area.width as usize;
        let max_lines = max_lines as usize;
        let mut x: usize = 0;
        let mut line: usize = 0;
        let mut entry_line: usize = 0;
        let mut placed: Vec<(Piece, usize, usize)> = Vec::with_capacity(pieces.len());
        for piece in pieces {
            if x > 0 && x + piece.width() > width {
                line += 1;
                x = 0;
            }
            if matches!(piece, Piece::Entry { .. }) {
                entry_line = line;
            }
            placed.push((*piece, x, line));
            x += piece.width() + CHIP_GAP;
        }

        let first = entry_line.saturating_sub(max_lines - 1);
        for (piece, x, line) in placed {
            if line < first || line >= first + max_lines {
                continue;
            }
            self.place(piece, x, (line - first) as u16);
        }
        self.lines = ((line - first + 1).min(max_lines)) as u16;
    }

    fn place(&mut self, piece: Piece, x: usize, line: u16) {
        let x = self.area.x + x as u16;
        let y = self.area.y + line;
        match piece {
            Piece::Chip { index, width } => {
                let rect = Rect::new(x, y, width as u16, 1);
                let remove = Rect::new(rect.right().saturating_sub(1), y, 1, 1);
                self.chips.push(ChipSlot { index, rect, remove });
            }
            Piece::Entry { width } => self.entry = Some(Rect::new(x, y, width as u16, 1)),
        }
    }

    fn place_dropdown(&mut self, controller: &InteractionController, scroll: &ScrollState) {
        let candidates = controller.candidates();
        let visible = candidates.visible_count();
        if !controller.is_open() || visible == 0 {
            return;
        }

        let top = self.area.y + self.lines;
        let room = self.area.bottom().saturating_sub(top);
        let wanted = u16::try_from(visible.min(controller.config().max_visible_options))
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let height = wanted.min(room);
        // Borders plus at least one row
        if height < 3 {
            return;
        }

        let frame = Rect::new(self.area.x, top, self.area.width, height);
        let inner = Rect::new(
            frame.x + 1,
            frame.y + 1,
            frame.width.saturating_sub(2),
            height - 2,
        );

        let mut window = scroll.clone();
        window.set_visible(inner.height as usize);
        window.set_total(visible);
        let row_width = if window.needs_scrollbar() {
            inner.width.saturating_sub(1)
        } else {
            inner.width
        };
        for (i, index) in window.visible_range().enumerate() {
            self.rows
                .push((index, Rect::new(inner.x, inner.y + i as u16, row_width, 1)));
        }

        self.dropdown = Some(frame);
        self.custom_row = candidates.custom_index();
        self.window = Some(window);
    }
}

/// Widget drawing one [`InteractionController`].
pub struct TokenField<'a> {
    controller: &'a InteractionController,
    scroll: &'a ScrollState,
    colors: ColorScheme,
    focused: bool,
}

impl<'a> TokenField<'a> {
    /// Create a widget over `controller`, scrolling the dropdown with `scroll`.
    pub fn new(controller: &'a InteractionController, scroll: &'a ScrollState) -> Self {
        Self {
            controller,
            scroll,
            colors: ColorScheme::default(),
            focused: false,
        }
    }

    /// Set the colors.
    pub fn colors(mut self, colors: ColorScheme) -> Self {
        self.colors = colors;
        self
    }

    /// Draw the caret.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Layout this widget would use in `area`.
    pub fn layout(&self, area: Rect) -> FieldLayout {
        FieldLayout::compute(self.controller, self.scroll, area)
    }

    fn render_chips(&self, layout: &FieldLayout, buf: &mut Buffer) {
        let colors = self.colors;
        let tokens = self.controller.selected();
        let cursor = self.controller.cursor();

        for slot in &layout.chips {
            let Some(text) = tokens.get(slot.index) else {
                continue;
            };
            let style = if cursor == slot.index as isize {
                Style::default()
                    .fg(colors.accent)
                    .bg(colors.chip)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text).bg(colors.chip)
            };
            buf.set_style(slot.rect, style);
            buf.set_stringn(
                slot.rect.x,
                slot.rect.y,
                text,
                slot.rect.width.saturating_sub(CHIP_CHROME as u16) as usize,
                style,
            );
            buf.set_stringn(
                slot.remove.x,
                slot.remove.y,
                REMOVE_MARK,
                1,
                style.fg(colors.text_muted),
            );
        }
    }

    fn render_entry(&self, layout: &FieldLayout, buf: &mut Buffer) {
        let Some(entry) = layout.entry else {
            return;
        };
        let colors = self.colors;
        let query = self.controller.query();
        let (text, style) = if query.is_empty() {
            let placeholder = self.controller.config().placeholder.as_deref();
            (placeholder.unwrap_or(""), Style::default().fg(colors.text_muted))
        } else {
            (query, Style::default().fg(colors.text))
        };
        buf.set_stringn(entry.x, entry.y, text, entry.width as usize, style);

        if self.focused {
            let offset = (UnicodeMeasure.measure_text_width(query) as u16)
                .min(entry.width.saturating_sub(1));
            if let Some(cell) = buf.cell_mut((entry.x + offset, entry.y)) {
                cell.set_style(Style::default().fg(colors.void).bg(colors.accent));
            }
        }
    }

    fn render_dropdown(&self, layout: &FieldLayout, buf: &mut Buffer) {
        let Some(frame) = layout.dropdown else {
            return;
        };
        let colors = self.colors;

        Clear.render(frame, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.accent))
            .style(Style::default().bg(colors.surface));
        let inner = block.inner(frame);
        block.render(frame, buf);

        let candidates = self.controller.candidates();
        let highlight = self.controller.highlight();
        for (index, area) in &layout.rows {
            let Some(row) = candidates.row(*index) else {
                continue;
            };
            let is_selected = highlight == Some(*index);
            let bg = if is_selected {
                colors.highlight
            } else {
                colors.surface
            };

            let mut style = if is_selected {
                Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)
            } else if row.is_custom() {
                Style::default().fg(colors.text_dim)
            } else {
                Style::default().fg(colors.text)
            };
            style = style.bg(bg);
            if row.is_custom() {
                style = style.add_modifier(Modifier::ITALIC);
            }

            buf.set_style(*area, Style::default().bg(bg));
            buf.set_stringn(
                area.x + ROW_INDENT,
                area.y,
                row.label(),
                area.width.saturating_sub(ROW_INDENT) as usize,
                style,
            );

            if is_selected && let Some(cell) = buf.cell_mut((area.x, area.y)) {
                cell.set_char('>')
                    .set_style(Style::default().fg(colors.accent).bg(bg));
            }
        }

        if let Some(window) = &layout.window {
            render_scrollbar(inner, buf, window, Style::default().fg(colors.accent));
        }
    }
}

impl Widget for TokenField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout(area);
        self.render_chips(&layout, buf);
        self.render_entry(&layout, buf);
        self.render_dropdown(&layout, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::FocusTarget;
    use crate::config::TokenFieldConfig;
    use crate::controller::Intent;
    use pretty_assertions::assert_eq;

    fn field(config: TokenFieldConfig) -> InteractionController {
        InteractionController::new(config)
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_entry_before_first_token() {
        let ctl = field(TokenFieldConfig::new(["Red", "Blue"]).with_initial_value(["Red", "Blue"]));
        let layout = FieldLayout::compute(&ctl, &ScrollState::default(), Rect::new(0, 0, 30, 1));

        assert_eq!(layout.entry, Some(Rect::new(0, 0, 1, 1)));
        assert_eq!(layout.chips.len(), 2);
        assert_eq!(layout.chips[0].rect, Rect::new(2, 0, 5, 1));
        assert_eq!(layout.chips[0].remove, Rect::new(6, 0, 1, 1));
        assert_eq!(layout.chips[1].rect, Rect::new(8, 0, 6, 1));
        assert_eq!(layout.lines, 1);
    }

    #[test]
    fn test_entry_follows_cursor() {
        let mut ctl =
            field(TokenFieldConfig::new(["Red", "Blue"]).with_initial_value(["Red", "Blue"]));
        ctl.dispatch(Intent::ArrowRight);
        ctl.dispatch(Intent::ArrowRight);
        let layout = FieldLayout::compute(&ctl, &ScrollState::default(), Rect::new(0, 0, 30, 1));

        assert_eq!(layout.chips[0].rect.x, 0);
        assert_eq!(layout.chips[1].rect.x, 6);
        assert_eq!(layout.entry, Some(Rect::new(13, 0, 1, 1)));
    }

    #[test]
    fn test_single_line_shifts_to_entry() {
        let mut ctl = field(
            TokenFieldConfig::new(["alpha", "beta", "gamma"])
                .with_initial_value(["alpha", "beta", "gamma"]),
        );
        for _ in 0..3 {
            ctl.dispatch(Intent::ArrowRight);
        }
        let layout = FieldLayout::compute(&ctl, &ScrollState::default(), Rect::new(0, 0, 10, 1));

        assert_eq!(layout.chips.len(), 1);
        assert_eq!(layout.chips[0].index, 2);
        assert_eq!(layout.chips[0].rect.x, 1);
        assert_eq!(layout.entry, Some(Rect::new(9, 0, 1, 1)));
    }

    #[test]
    fn test_wraps_up_to_max_lines() {
        let ctl = field(
            TokenFieldConfig::new(["alpha", "beta", "gamma"])
                .with_initial_value(["alpha", "beta", "gamma"])
                .with_max_lines(2),
        );
        let layout = FieldLayout::compute(&ctl, &ScrollState::default(), Rect::new(0, 0, 12, 4));

        assert_eq!(layout.lines, 2);
        assert_eq!(layout.chips.len(), 2);
        assert_eq!(layout.chips[1].rect, Rect::new(0, 1, 6, 1));
    }

    #[test]
    fn test_hit_test_field() {
        let ctl = field(TokenFieldConfig::new(["Red", "Blue"]).with_initial_value(["Red", "Blue"]));
        let layout = FieldLayout::compute(&ctl, &ScrollState::default(), Rect::new(0, 0, 30, 6));

        assert_eq!(layout.hit_test(3, 0), Some(Hit::Token(0)));
        assert_eq!(layout.hit_test(6, 0), Some(Hit::RemoveToken(0)));
        assert_eq!(layout.hit_test(0, 0), Some(Hit::TextEntry));
        assert_eq!(layout.hit_test(25, 0), Some(Hit::Field));
        // Closed dropdown takes no space
        assert_eq!(layout.hit_test(5, 3), None);
    }

    #[test]
    fn test_dropdown_rows() {
        let mut ctl = field(TokenFieldConfig::new(["a", "b", "c"]));
        ctl.dispatch(Intent::Focus(FocusTarget::TextEntry));
        let layout = FieldLayout::compute(&ctl, &ScrollState::default(), Rect::new(0, 0, 30, 10));

        assert_eq!(layout.dropdown, Some(Rect::new(0, 1, 30, 5)));
        assert_eq!(layout.rows.len(), 3);
        assert_eq!(layout.rows[1], (1, Rect::new(1, 3, 28, 1)));
        assert_eq!(layout.hit_test(5, 3), Some(Hit::Row(1)));
        assert_eq!(layout.hit_test(0, 1), Some(Hit::Field));
    }

    #[test]
    fn test_hit_custom_row() {
        let mut ctl = field(TokenFieldConfig::new(["Red"]).with_custom_options(true));
        ctl.dispatch(Intent::Type("Re".into()));
        let layout = FieldLayout::compute(&ctl, &ScrollState::default(), Rect::new(0, 0, 20, 6));

        assert_eq!(layout.hit_test(4, 2), Some(Hit::Row(0)));
        assert_eq!(layout.hit_test(4, 3), Some(Hit::CustomRow));
    }

    #[test]
    fn test_dropdown_follows_scroll() {
        use crate::collaborator::RowScroller;

        let mut ctl = field(TokenFieldConfig::new(["a", "b", "c", "d", "e"]).with_max_visible_options(2));
        ctl.dispatch(Intent::Focus(FocusTarget::TextEntry));
        let mut scroll = ScrollState::new(5, 2);
        scroll.scroll_row_into_view(4);
        let layout = FieldLayout::compute(&ctl, &scroll, Rect::new(0, 0, 20, 10));

        let indices: Vec<usize> = layout.rows.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![3, 4]);
        // Leaves a column for the scrollbar
        assert_eq!(layout.rows[0].1.width, 17);
    }

    #[test]
    fn test_dropdown_needs_room() {
        let mut ctl = field(TokenFieldConfig::new(["a"]));
        ctl.dispatch(Intent::Focus(FocusTarget::TextEntry));
        let layout = FieldLayout::compute(&ctl, &ScrollState::default(), Rect::new(0, 0, 20, 2));
        assert_eq!(layout.dropdown, None);
        assert!(layout.rows.is_empty());
    }

    #[test]
    fn test_render_chips_and_placeholder() {
        let ctl = field(
            TokenFieldConfig::new(["Red"])
                .with_initial_value(["Red"])
                .with_placeholder("Pick"),
        );
        let scroll = ScrollState::default();
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        TokenField::new(&ctl, &scroll).render(area, &mut buf);

        assert_eq!(line(&buf, 0), "Pick  Red ×         ");
    }

    #[test]
    fn test_render_dropdown() {
        let mut ctl = field(TokenFieldConfig::new(["Red", "Green"]).with_custom_options(true));
        ctl.dispatch(Intent::Type("Gr".into()));
        ctl.dispatch(Intent::ArrowDown);
        let scroll = ScrollState::default();
        let area = Rect::new(0, 0, 16, 6);
        let mut buf = Buffer::empty(area);
        TokenField::new(&ctl, &scroll).focused(true).render(area, &mut buf);

        assert!(line(&buf, 0).starts_with("Gr"));
        assert_eq!(line(&buf, 1), "╭──────────────╮");
        assert_eq!(line(&buf, 2), "│> Green       │");
        assert_eq!(line(&buf, 3), "│  Add \"Gr\"    │");
        assert_eq!(line(&buf, 4), "╰──────────────╯");
    }

    #[test]
    fn test_render_caret_when_focused() {
        let mut ctl = field(TokenFieldConfig::new(["Red"]));
        ctl.dispatch(Intent::Type("ab".into()));
        let scroll = ScrollState::default();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        TokenField::new(&ctl, &scroll).focused(true).render(area, &mut buf);

        assert_eq!(buf[(2, 0)].bg, ColorScheme::default().accent);
        assert_ne!(buf[(1, 0)].bg, ColorScheme::default().accent);
    }
}
