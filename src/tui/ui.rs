//! UI rendering for the debugger.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, List, ListItem},
    style::{Color, Style, Modifier},
};
use super::app::{DebuggerApp, Mode};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &DebuggerApp) {
    match app.mode {
        Mode::Debug => draw_debugger(frame, app),
        Mode::Emulate => draw_emulator(frame, app),
    }
}

/// Display, input box and status only.
fn draw_emulator(frame: &mut Frame, app: &DebuggerApp) {
    let lcd_height = app.machine.display.grid().rows() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(lcd_height),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(frame.area());

    draw_lcd(frame, chunks[0], app);
    draw_input(frame, chunks[1], app);
    draw_status(frame, chunks[2], app);

    let help = Paragraph::new("F12: Reset  Enter: Send input  Esc: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default()
            .title(" Help ")
            .borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn draw_debugger(frame: &mut Frame, app: &DebuggerApp) {
    let lcd_height = app.machine.display.grid().rows() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(frame.area());

    // Left side: display, code and status
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(lcd_height),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(chunks[0]);

    draw_lcd(frame, left_chunks[0], app);
    draw_disassembly(frame, left_chunks[1], app);
    draw_input(frame, left_chunks[2], app);
    draw_status(frame, left_chunks[3], app);

    // Right side: registers, memory and help
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(6),
            Constraint::Length(4),
        ])
        .split(chunks[1]);

    draw_registers(frame, right_chunks[0], app);
    draw_memory(frame, right_chunks[1], app);
    draw_help(frame, right_chunks[2]);
}

/// Draw the character display with the cursor highlighted.
fn draw_lcd(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let display = &app.machine.display;
    let grid = display.grid();
    let (cursor_row, cursor_col) = display.cursor();

    let lines: Vec<Line> = (0..grid.rows())
        .map(|row| {
            let spans: Vec<Span> = (0..grid.columns())
                .map(|col| {
                    let c = grid.get(row, col);
                    let style = if (row, col) == (cursor_row, cursor_col) {
                        Style::default().fg(Color::Black).bg(Color::Green)
                    } else {
                        Style::default().fg(Color::Green)
                    };
                    Span::styled(c.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default()
            .title(" Display ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Draw disassembly view around PC.
fn draw_disassembly(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let disasm = app.get_disassembly((area.height as usize).saturating_sub(2));

    let items: Vec<ListItem> = disasm
        .iter()
        .map(|(addr, instr, is_current)| {
            let prefix = if *is_current { "▶ " } else { "  " };
            let bp = if app.breakpoints.contains(addr) { "●" } else { " " };
            let text = format!("{}{:04x}: {}", prefix, addr, instr);

            let style = if *is_current {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if app.breakpoints.contains(addr) {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };

            ListItem::new(format!("{} {}", bp, text)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Disassembly ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(list, area);
}

/// Draw register state.
fn draw_registers(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let regs = &app.machine.cpu.regs;
    let flag_style = |set: bool| {
        if set {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let content = vec![
        Line::from(vec![
            Span::raw("X: "),
            Span::styled(format!("{}", regs.x), Style::default().fg(Color::White)),
            Span::raw(format!(" = {:3}", regs.x.value())),
            Span::raw("   Y: "),
            Span::styled(format!("{}", regs.y), Style::default().fg(Color::White)),
            Span::raw(format!(" = {:3}", regs.y.value())),
        ]),
        Line::from(vec![
            Span::raw("H: "),
            Span::styled(format!(" {}", regs.h), Style::default().fg(Color::White)),
            Span::raw(format!(" = {:3}", regs.h.value())),
            Span::raw("   L: "),
            Span::styled(format!("{}", regs.l), Style::default().fg(Color::White)),
            Span::raw(format!(" = {:3}", regs.l.value())),
        ]),
        Line::from(vec![
            Span::raw("IN: "),
            Span::styled(format!("{:#04x}", regs.input.value()), Style::default().fg(Color::White)),
            Span::raw("   PC: "),
            Span::styled(format!("{:04x}", regs.pc.value()), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::raw("CF: "),
            Span::styled(format!("{}", regs.carry as u8), flag_style(regs.carry)),
            Span::raw("   IF: "),
            Span::styled(format!("{}", regs.input_ready as u8), flag_style(regs.input_ready)),
            Span::raw("   Cycles: "),
            Span::styled(format!("{}", app.machine.cpu.cycles), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::raw("State: "),
            if app.machine.terminated() {
                Span::styled("Halted", Style::default().fg(Color::Red))
            } else if app.running {
                Span::styled("Running", Style::default().fg(Color::Green))
            } else {
                Span::styled("Paused", Style::default().fg(Color::Yellow))
            },
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Registers ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Draw RAM around the H:L address.
fn draw_memory(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let visible_rows = (area.height as usize).saturating_sub(2);
    let address = app.machine.cpu.regs.address().value() as usize;
    let start = address.saturating_sub(visible_rows / 2);

    let items: Vec<ListItem> = app
        .machine
        .cpu
        .ram
        .dump(start, visible_rows)
        .into_iter()
        .map(|(addr, value)| {
            let text = format!("{:04x}: {} = {:3}", addr, value, value.value());

            let style = if addr == address {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if !value.is_zero() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Memory (H:L) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)));

    frame.render_widget(list, area);
}

/// Draw the input box with a live parse of its contents.
fn draw_input(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let preview = app.input_preview();
    let preview_style = if preview.starts_with('!') {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::raw("> "),
        Span::styled(app.input.clone(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(preview, preview_style),
    ]);

    let input = Paragraph::new(line)
        .block(Block::default()
            .title(" Input ")
            .borders(Borders::ALL));

    frame.render_widget(input, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("F5: Run/Pause  F6: Step  F9: Breakpoint"),
        Line::from("F12: Reset  Enter: Send input  Esc: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}
