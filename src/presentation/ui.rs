use crate::application::{settings_rows, App, AppMode, LoginField, Screen, SettingsRow, DASHBOARD_MENU};
use crate::domain::{
    checklist_progress, compliance_report, is_user_entry, outstanding_checks, SessionStatus,
    SlotStatus, Speaker, WizardStep, ALL_DOCUMENT_KEYS, ALL_USER_FIELDS, ALL_WIZARD_STEPS,
    DEMO_EMAIL, IMPROVEMENT_SUGGESTIONS,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Draws one frame: header, the current screen, the status bar and, in
/// help mode, the help popup on top.
pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.screen {
        Screen::Login => render_login(f, app, chunks[1]),
        Screen::Dashboard => render_dashboard(f, app, chunks[1]),
        Screen::Wizard => render_wizard(f, app, chunks[1]),
        Screen::Chat => render_chat_screen(f, app, chunks[1]),
        Screen::Grants => render_grants(f, app, chunks[1]),
        Screen::History => render_history(f, app, chunks[1]),
        Screen::Settings => render_settings(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn highlight(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let user = app
        .session
        .user()
        .map(|user| user.name.as_str())
        .unwrap_or("not signed in");
    let header = Paragraph::new(format!("granted - Grant Application Assistant | {user}"))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_login(f: &mut Frame, app: &App, area: Rect) {
    let field_style = |field: LoginField| {
        if app.login_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };
    let masked = "*".repeat(app.login_password.chars().count());
    let lines = vec![
        Line::from("Sign in to continue"),
        Line::from(""),
        Line::from(vec![
            Span::raw("Email:    "),
            Span::styled(app.login_email.as_str(), field_style(LoginField::Email)),
        ]),
        Line::from(vec![
            Span::raw("Password: "),
            Span::styled(masked, field_style(LoginField::Password)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Demo account: {DEMO_EMAIL} / password123"),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Sign in"));
    f.render_widget(form, area);
}

fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let (pending, approved) = app.history_counts();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let stat_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, app.stats.len().max(1) as u32); app.stats.len()])
        .split(chunks[0]);
    for (stat, stat_area) in app.stats.iter().zip(stat_areas.iter()) {
        let lines = vec![
            Line::from(Span::styled(stat.value, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(stat.change, Style::default().fg(Color::Green))),
        ];
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(stat.title)),
            *stat_area,
        );
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    let items: Vec<ListItem> = DASHBOARD_MENU
        .iter()
        .enumerate()
        .map(|(idx, (_, label))| ListItem::new(*label).style(highlight(idx == app.selected)))
        .collect();
    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Dashboard | pending: {pending} | approved: {approved}")),
    );
    f.render_widget(menu, columns[0]);

    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    let recent: Vec<Row> = app
        .chat_sessions
        .iter()
        .map(|session| {
            Row::new(vec![
                Cell::from(session.title),
                Cell::from(format!("{}%", session.progress)),
                Cell::from(session.status.to_string()).style(session_status_style(session.status)),
                Cell::from(session.last_activity).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Min(24),
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    f.render_widget(
        Table::new(recent, widths)
            .block(Block::default().borders(Borders::ALL).title("Recent Applications"))
            .column_spacing(1),
        panels[0],
    );

    let notes: Vec<ListItem> = app
        .notifications
        .iter()
        .map(|note| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", note.kind.marker()), Style::default().fg(Color::Yellow)),
                Span::raw(note.message),
                Span::styled(format!("  {}", note.time), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(notes).block(Block::default().borders(Borders::ALL).title("Notifications")),
        panels[1],
    );
}

fn session_status_style(status: SessionStatus) -> Style {
    match status {
        SessionStatus::InProgress => Style::default().fg(Color::Blue),
        SessionStatus::Submitted => Style::default().fg(Color::Green),
        SessionStatus::Draft => Style::default().fg(Color::DarkGray),
    }
}

fn render_wizard(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[0]);

    let step = app.wizard.current_step;
    let steps: Vec<String> = ALL_WIZARD_STEPS
        .iter()
        .map(|s| {
            if *s == step {
                format!("[{}. {}]", s.number(), s.title())
            } else {
                format!("{}. {}", s.number(), s.title())
            }
        })
        .collect();
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(steps.join("  ")))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(app.wizard.progress_percent());
    f.render_widget(progress, rows[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Step {} of {}: {}", step.number(), WizardStep::LAST.number(), step.title()));
    match step {
        WizardStep::BusinessDetails => render_business_details(f, app, rows[1], block),
        WizardStep::GrantDiscovery => render_grant_discovery(f, app, rows[1], block),
        WizardStep::ApplicationGuidance => render_documents(f, app, rows[1], block),
        WizardStep::ComplianceCheck => render_compliance_check(f, rows[1], block),
        WizardStep::SubmitApplication => render_submit(f, app, rows[1], block),
    }

    render_chat(f, app, columns[1]);
}

fn render_business_details(f: &mut Frame, app: &App, area: Rect, block: Block) {
    let rows: Vec<Row> = ALL_USER_FIELDS
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let value = match app.mode {
                AppMode::Editing(editing) if editing == *field => format!("{}_", app.input),
                _ => app.wizard.user_info.display(*field).to_string(),
            };
            let hint = if field.is_free_text() { "Enter: edit" } else { "←/→: choose" };
            Row::new(vec![
                Cell::from(field.label()),
                Cell::from(value),
                Cell::from(hint).style(Style::default().fg(Color::DarkGray)),
            ])
            .style(highlight(idx == app.selected))
        })
        .collect();
    let widths = [Constraint::Length(22), Constraint::Min(20), Constraint::Length(12)];
    f.render_widget(Table::new(rows, widths).block(block).column_spacing(1), area);
}

fn render_grant_discovery(f: &mut Frame, app: &App, area: Rect, block: Block) {
    let items: Vec<ListItem> = app
        .wizard
        .candidates()
        .iter()
        .enumerate()
        .map(|(idx, grant)| {
            let marker = if app.wizard.is_selected(&grant.id) { "(*)" } else { "( )" };
            let lines = vec![
                Line::from(Span::styled(
                    format!("{marker} {}  {}", grant.title, grant.amount),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("    {}", grant.description)),
                Line::from(format!("    Eligibility: {}", grant.eligibility)),
                Line::from(format!("    Deadline: {}", grant.deadline)),
            ];
            ListItem::new(lines).style(highlight(idx == app.selected))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

fn render_documents(f: &mut Frame, app: &App, area: Rect, block: Block) {
    let rows: Vec<Row> = ALL_DOCUMENT_KEYS
        .iter()
        .enumerate()
        .map(|(idx, key)| {
            let slot = app.uploads.slot(*key);
            let status_style = match slot.status {
                SlotStatus::Ready => Style::default().fg(Color::DarkGray),
                SlotStatus::Uploading => Style::default().fg(Color::Yellow),
                SlotStatus::Saved => Style::default().fg(Color::Green),
                SlotStatus::Rejected => Style::default().fg(Color::Red),
            };
            let detail = match (&slot.filename, &slot.download_url) {
                (Some(name), Some(url)) => format!("{} ({name}) {url}", slot.note),
                _ => slot.note.clone(),
            };
            Row::new(vec![
                Cell::from(key.label()),
                Cell::from(slot.status.as_str()).style(status_style),
                Cell::from(detail),
            ])
            .style(highlight(idx == app.selected))
        })
        .collect();
    let widths = [Constraint::Length(28), Constraint::Length(10), Constraint::Min(20)];
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Document", "Status", "Details"]).style(Style::default().fg(Color::Yellow)))
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_compliance_check(f: &mut Frame, area: Rect, block: Block) {
    let report = compliance_report();
    let mut lines = vec![Line::from(Span::styled(
        format!("Compliance Report ({} to review)", outstanding_checks(&report)),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for item in &report {
        let style = if item.verdict.needs_attention() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Green)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<28}", item.check)),
            Span::styled(item.verdict.as_str(), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Suggestions for Improvement:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for suggestion in IMPROVEMENT_SUGGESTIONS {
        lines.push(Line::from(format!("  • {suggestion}")));
    }
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_submit(f: &mut Frame, app: &App, area: Rect, block: Block) {
    let grant = app
        .wizard
        .selected_grant
        .as_ref()
        .map(|grant| format!("{} - {} (due {})", grant.title, grant.amount, grant.deadline))
        .unwrap_or_else(|| "No grant selected".to_string());
    let lines = vec![
        Line::from(Span::styled(grant, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("Applicant: {}", app.wizard.user_info.business_name)),
        Line::from(""),
        Line::from("Press x to export an application summary as CSV."),
    ];
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_chat(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let lines: Vec<Line> = app
        .chat
        .log()
        .iter()
        .map(|entry| {
            let style = if is_user_entry(entry) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(entry.as_str(), style))
        })
        .collect();
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible);
    let title = if app.chat.awaiting_reply() {
        "AI Assistant (typing...)"
    } else {
        "AI Assistant"
    };
    let log = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(log, chunks[0]);

    let prompt_style = if matches!(app.mode, AppMode::Chat) {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let prompt = Paragraph::new(app.input_for(AppMode::Chat))
        .style(prompt_style)
        .block(Block::default().borders(Borders::ALL).title("Message (Tab)"));
    f.render_widget(prompt, chunks[1]);
}

fn render_chat_screen(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area);

    let sessions: Vec<ListItem> = app
        .chat_sessions
        .iter()
        .enumerate()
        .map(|(idx, session)| {
            let lines = vec![
                Line::from(Span::styled(session.title, Style::default().add_modifier(Modifier::BOLD))),
                Line::from(vec![
                    Span::styled(session.status.to_string(), session_status_style(session.status)),
                    Span::raw(format!("  {}%  {}", session.progress, session.last_activity)),
                ]),
                Line::from(Span::styled(session.last_message, Style::default().fg(Color::DarkGray))),
            ];
            ListItem::new(lines).style(highlight(idx == app.selected))
        })
        .collect();
    f.render_widget(
        List::new(sessions).block(Block::default().borders(Borders::ALL).title("Chat Sessions")),
        columns[0],
    );

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(columns[1]);
    let lines: Vec<Line> = app
        .transcript
        .iter()
        .map(|message| {
            let (who, style) = match message.speaker {
                Speaker::Bot => ("GrantBot", Style::default().fg(Color::White)),
                Speaker::User => ("You", Style::default().fg(Color::Cyan)),
            };
            Line::from(Span::styled(
                format!("{who} [{}]: {}", message.timestamp, message.content),
                style,
            ))
        })
        .collect();
    let title = app
        .highlighted_session()
        .map(|session| session.title)
        .unwrap_or("Conversation");
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false }),
        middle[0],
    );
    let prompt_style = if matches!(app.mode, AppMode::Chat) {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(
        Paragraph::new(app.input_for(AppMode::Chat))
            .style(prompt_style)
            .block(Block::default().borders(Borders::ALL).title("Message (Tab)")),
        middle[1],
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(columns[2]);
    let (done, total) = checklist_progress(&app.checklist);
    let checklist: Vec<ListItem> = app
        .checklist
        .iter()
        .map(|item| {
            let (marker, style) = if item.completed {
                ("✓", Style::default().fg(Color::Green))
            } else if item.current {
                ("▶", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(format!("{marker} {}", item.section)).style(style)
        })
        .collect();
    f.render_widget(
        List::new(checklist).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Application Sections {done}/{total}")),
        ),
        side[0],
    );

    let info = &app.grant_info;
    let info_lines = vec![
        Line::from(Span::styled(info.title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(info.organization),
        Line::from(format!("Amount: {}", info.amount)),
        Line::from(format!("Deadline: {}", info.deadline)),
        Line::from(format!("{} | {}", info.phase, info.duration)),
    ];
    f.render_widget(
        Paragraph::new(info_lines)
            .block(Block::default().borders(Borders::ALL).title("Grant Info"))
            .wrap(Wrap { trim: true }),
        side[1],
    );
}

fn render_grants(f: &mut Frame, app: &App, area: Rect) {
    let grants = app.filtered_grants();
    let rows: Vec<Row> = grants
        .iter()
        .enumerate()
        .map(|(idx, grant)| {
            Row::new(vec![
                Cell::from(grant.title),
                Cell::from(grant.organization),
                Cell::from(grant.amount),
                Cell::from(grant.deadline),
                Cell::from(grant.difficulty.to_string()),
            ])
            .style(highlight(idx == app.selected))
        })
        .collect();
    let widths = [
        Constraint::Min(30),
        Constraint::Length(32),
        Constraint::Length(12),
        Constraint::Length(18),
        Constraint::Length(8),
    ];
    let title = format!(
        "Grants directory | category: {} | search: {} | {} found",
        app.grant_category,
        if app.grant_query.is_empty() { "-" } else { app.grant_query.as_str() },
        grants.len()
    );
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Title", "Organization", "Amount", "Deadline", "Difficulty"])
                .style(Style::default().fg(Color::Yellow)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .history
        .iter()
        .enumerate()
        .map(|(idx, application)| {
            Row::new(vec![
                Cell::from(application.grant_title),
                Cell::from(application.business_name),
                Cell::from(application.amount),
                Cell::from(application.status.as_str()),
            ])
            .style(highlight(idx == app.selected))
        })
        .collect();
    let (pending, approved) = app.history_counts();
    let widths = [
        Constraint::Min(30),
        Constraint::Length(26),
        Constraint::Length(12),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Grant", "Business", "Amount", "Status"])
                .style(Style::default().fg(Color::Yellow)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Past applications | pending: {pending} | approved: {approved}")),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_settings(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = settings_rows()
        .enumerate()
        .map(|(idx, row)| {
            let (section, label, value) = match row {
                SettingsRow::Profile(field) => {
                    let value = match app.mode {
                        AppMode::EditingProfile(editing) if editing == field => format!("{}_", app.input),
                        _ => app.settings.profile.get(field).to_string(),
                    };
                    ("Profile", field.label(), value)
                }
                SettingsRow::Preference(key) => ("Preferences", key.label(), app.settings.display_value(key)),
            };
            Row::new(vec![
                Cell::from(section).style(Style::default().fg(Color::DarkGray)),
                Cell::from(label),
                Cell::from(value),
            ])
            .style(highlight(idx == app.selected))
        })
        .collect();
    let widths = [Constraint::Length(12), Constraint::Length(24), Constraint::Min(8)];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Settings"))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => match &app.status_message {
            Some(status) => status.clone(),
            None => normal_hint(app).to_string(),
        },
        AppMode::Login => app
            .status_message
            .clone()
            .unwrap_or_else(|| "Tab: switch field | Enter: next/sign in | Ctrl+C: quit".to_string()),
        AppMode::Editing(field) => {
            format!("{}: {} (Enter to save, Esc to cancel)", field.label(), app.input)
        }
        AppMode::EditingProfile(field) => {
            format!("{}: {} (Enter to save, Esc to cancel)", field.label(), app.input)
        }
        AppMode::Chat => "Enter: send | Esc/Tab: leave chat".to_string(),
        AppMode::PickFile => format!(
            "File for {}: {} (.docx or .pdf; Enter to upload, Esc to cancel)",
            app.uploads.pending().map(|key| key.label()).unwrap_or("document"),
            app.input
        ),
        AppMode::ExportSummary => {
            format!("Export summary as: {} (Enter to export, Esc to cancel)", app.input)
        }
        AppMode::Search => format!("Search: {} (Enter to keep, Esc to clear)", app.input),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal | AppMode::Login => Style::default(),
            AppMode::Editing(_) | AppMode::EditingProfile(_) | AppMode::Chat => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::PickFile | AppMode::Search => Style::default().fg(Color::Yellow),
            AppMode::ExportSummary => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);
}

fn normal_hint(app: &App) -> &'static str {
    match app.screen {
        Screen::Login => "",
        Screen::Dashboard => "↑↓: move | Enter: open | w/c/g/h/s: jump | l: sign out | ?: help | q: quit",
        Screen::Wizard => match app.wizard.current_step {
            WizardStep::BusinessDetails => "Enter: edit | ←/→: choose | n/p: next/previous step | Tab: chat | Esc: dashboard",
            WizardStep::GrantDiscovery => "Enter: select grant | n/p: next/previous step | Tab: chat | Esc: dashboard",
            WizardStep::ApplicationGuidance => "Enter: upload file | y: copy link | n/p: step | Tab: chat | Esc: dashboard",
            WizardStep::ComplianceCheck => "n/p: next/previous step | Tab: chat | Esc: dashboard",
            WizardStep::SubmitApplication => "x: export summary | p: previous step | Tab: chat | Esc: dashboard",
        },
        Screen::Chat => "↑↓: session | Tab/c: write a message | Esc: dashboard",
        Screen::Grants => "/: search | c: next category | ↑↓: move | Esc: dashboard",
        Screen::History => "↑↓: move | Esc: dashboard",
        Screen::Settings => "Enter: edit/toggle | Space: toggle | ←/→: cycle | ↑↓: move | Esc: dashboard",
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("granted Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"GRANTED KEY REFERENCE

=== DASHBOARD ===
↑↓ or j/k       Move through the menu
Enter           Open the highlighted entry
w / c / g / h / s
                Wizard, chat sessions, grants directory, history, settings
l               Sign out

=== APPLICATION WIZARD ===
n / PgDn        Next step (needs every business detail, then a grant)
p / PgUp        Previous step
Tab or c        Chat with the assistant (Esc or Tab to leave)

Step 1 Business Details
  Enter         Edit a text field, or step a choice field
  ←/→           Cycle the options of a choice field

Step 2 Grant Discovery
  Enter/Space   Select the highlighted grant

Step 3 Application Guidance
  Enter or u    Upload a .docx or .pdf for the highlighted document
  y             Copy the saved file's download link

Step 4 Compliance Check
  Read the report and the suggestions, then continue

Step 5 Submit Application
  x             Export an application summary as CSV

=== CHAT SESSIONS ===
↑↓              Pick a saved session
Tab or c        Write a message into the transcript

=== GRANTS DIRECTORY ===
/               Search titles, organizations and descriptions
c or Tab        Cycle the category filter

=== SETTINGS ===
Enter           Edit a profile field, or toggle a preference
Space           Toggle the highlighted preference
←/→             Cycle the language or font size

=== GENERAL ===
F1 or ?         Show this help
Esc             Back to the dashboard
q               Quit (Ctrl+C works everywhere)

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll one line
Page Up/Down    Scroll five lines
Home            Jump to the top
Esc/F1/?/q      Close this window"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemorySessionRepository, UploadEndpoint, UploadError, UploadJob, UploadReceipt};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    struct IdleEndpoint;

    impl UploadEndpoint for IdleEndpoint {
        fn upload(&self, _job: &UploadJob) -> Result<UploadReceipt, UploadError> {
            Err(UploadError::rejected(None, None))
        }
    }

    fn new_app() -> App {
        App::new(
            "http://127.0.0.1:5000",
            Duration::from_millis(1000),
            Box::new(MemorySessionRepository::default()),
            Arc::new(IdleEndpoint),
        )
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_compliance_step_shows_report_and_suggestions() {
        let mut app = new_app();
        app.open_screen(Screen::Wizard);
        app.wizard.current_step = WizardStep::ComplianceCheck;
        let text = screen_text(&app);
        assert!(text.contains("Compliance Report (1 to review)"));
        assert!(text.contains("Eligibility Requirements"));
        assert!(text.contains("Budget Justification"));
        assert!(text.contains("Needs Review"));
        assert!(text.contains("Suggestions for Improvement:"));
        assert!(text.contains("letters of support"));
    }

    #[test]
    fn test_chat_screen_shows_sessions_checklist_and_grant_info() {
        let mut app = new_app();
        app.open_screen(Screen::Chat);
        let text = screen_text(&app);
        assert!(text.contains("Chat Sessions"));
        assert!(text.contains("Women in Tech Grant"));
        assert!(text.contains("Application Sections 2/8"));
        assert!(text.contains("▶ Technical Approach"));
        assert!(text.contains("✓ Business Information"));
        assert!(text.contains("National Science Foundation"));
    }

    #[test]
    fn test_dashboard_shows_stats_recent_and_notifications() {
        let mut app = new_app();
        app.open_screen(Screen::Dashboard);
        let text = screen_text(&app);
        assert!(text.contains("Success Rate"));
        assert!(text.contains("Recent Applications"));
        assert!(text.contains("Renewable Energy Startup Fund"));
        assert!(text.contains("Notifications"));
        assert!(text.contains("deadline in 5 days"));
    }

    #[test]
    fn test_settings_show_profile_and_language() {
        let mut app = new_app();
        app.open_screen(Screen::Settings);
        app.settings.cycle_language(true);
        let text = screen_text(&app);
        assert!(text.contains("Tech Startup Inc."));
        assert!(text.contains("Español"));
    }
}
