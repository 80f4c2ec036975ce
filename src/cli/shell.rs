//! Interactive terminal front end
//!
//! Shows the auth form while logged out, otherwise the routed screen with
//! its actions plus the sidebar menu. Every action is one request; the
//! screen is re-rendered after it completes.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use std::path::PathBuf;

use crate::app::manage_qr::format_created;
use crate::app::sidebar::{avatar_initial, display_name};
use crate::app::{App, AuthMode, Screen, View};
use crate::cli::{confirm, error, info, print_field, print_heading, print_qr_table, spinner, success};
use crate::nav::Route;
use crate::qr::{HexColor, QrStyle};

/// Run until the user quits
pub async fn run(mut app: App) -> Result<()> {
    if !console::Term::stdout().is_term() {
        anyhow::bail!("'qrdash app' needs an interactive terminal");
    }
    let theme = ColorfulTheme::default();

    loop {
        let view = app.render().await.view();
        let keep_going = match view {
            View::Auth => auth_screen(&mut app, &theme).await?,
            View::Dashboard => dashboard_screen(&mut app, &theme).await?,
            View::CreateQr => create_screen(&mut app, &theme).await?,
            View::ManageQr => manage_screen(&mut app, &theme).await?,
        };
        if !keep_going {
            break;
        }
    }

    Ok(())
}

async fn auth_screen(app: &mut App, theme: &ColorfulTheme) -> Result<bool> {
    let (mode, title, toggle, last_error) = match app.parts().0 {
        Some(Screen::Auth(auth)) => (auth.mode, auth.title(), auth.toggle_label(), auth.error.clone()),
        _ => return Ok(true),
    };

    print_heading(title);
    if let Some(message) = last_error {
        error(&message);
    }

    let submit = match mode {
        AuthMode::Login => "Login",
        AuthMode::Signup => "Sign Up",
    };
    let choice = Select::with_theme(theme)
        .items(&[submit, toggle, "Quit"])
        .default(0)
        .interact()?;

    match choice {
        0 => {
            let username: String = Input::with_theme(theme).with_prompt("Username").interact_text()?;
            let email = if mode == AuthMode::Signup {
                Input::with_theme(theme).with_prompt("Email").interact_text()?
            } else {
                String::new()
            };
            let password = Password::with_theme(theme).with_prompt("Password").interact()?;

            if let Some(Screen::Auth(auth)) = app.parts().0 {
                auth.username = username;
                auth.email = email;
                auth.password = password;
            }

            let pb = spinner("Authenticating...");
            let ok = app.submit_auth().await;
            pb.finish_and_clear();
            if ok {
                success(&format!(
                    "Welcome, {}",
                    display_name(app.session().username())
                ));
            }
            Ok(true)
        }
        1 => {
            if let Some(Screen::Auth(auth)) = app.parts().0 {
                auth.toggle_mode();
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn print_header(app: &App, route: Route) {
    let username = app.session().username();
    println!();
    println!(
        "{} {}  {}",
        format!("[{}]", avatar_initial(username)).cyan().bold(),
        display_name(username),
        route.title().bold().underline()
    );
    println!();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavItem {
    Menu(Route),
    Back,
    Forward,
    Logout,
    Quit,
}

/// Sidebar and history entries shared by every authenticated screen
const NAV_ITEMS: [(&str, NavItem); 7] = [
    ("Menu: Dashboard", NavItem::Menu(Route::Dashboard)),
    ("Menu: Create QR", NavItem::Menu(Route::CreateQr)),
    ("Menu: Manage QR", NavItem::Menu(Route::ManageQr)),
    ("Back", NavItem::Back),
    ("Forward", NavItem::Forward),
    ("Logout", NavItem::Logout),
    ("Quit", NavItem::Quit),
];

/// Apply a navigation entry. Returns false when the user quits.
fn handle_nav(app: &mut App, item: NavItem) -> Result<bool> {
    match item {
        NavItem::Menu(route) => app.navigate(route),
        NavItem::Back => {
            if !app.back() {
                info("Already at the first page");
            }
        }
        NavItem::Forward => {
            if !app.forward() {
                info("Already at the latest page");
            }
        }
        NavItem::Logout => {
            app.logout()?;
            success("Logged out");
        }
        NavItem::Quit => return Ok(false),
    }
    Ok(true)
}

enum Choice {
    /// Index into the screen's own actions
    Action(usize),
    /// A navigation entry was handled; false means quit
    Navigated(bool),
}

fn pick(app: &mut App, theme: &ColorfulTheme, actions: &[&str]) -> Result<Choice> {
    let mut items: Vec<String> = actions.iter().map(|s| s.to_string()).collect();
    items.extend(NAV_ITEMS.iter().map(|(label, _)| label.dimmed().to_string()));

    let choice = Select::with_theme(theme).items(&items).default(0).interact()?;
    if choice < actions.len() {
        return Ok(Choice::Action(choice));
    }
    let (_, item) = NAV_ITEMS[choice - actions.len()];
    Ok(Choice::Navigated(handle_nav(app, item)?))
}

async fn dashboard_screen(app: &mut App, theme: &ColorfulTheme) -> Result<bool> {
    print_header(app, Route::Dashboard);

    if let Some(Screen::Dashboard(dashboard)) = app.parts().0 {
        if let Some(hello) = &dashboard.hello_response {
            print_field("GET /api/hello", hello);
        }
        if let Some(time) = &dashboard.time_response {
            print_field("Current Time", time);
        }
        if let Some(echo) = &dashboard.echo_response {
            print_field("Echo Response", echo);
        }
        if let Some(message) = &dashboard.error {
            error(message);
        }
    }

    let action = match pick(app, theme, &["Fetch Hello", "Fetch Time", "Send Echo"])? {
        Choice::Action(action) => action,
        Choice::Navigated(keep_going) => return Ok(keep_going),
    };

    let (echo_text, echo_number) = if action == 2 {
        let text: String = Input::with_theme(theme)
            .with_prompt("Text to echo")
            .allow_empty(true)
            .interact_text()?;
        let number: i64 = Input::with_theme(theme)
            .with_prompt("Number")
            .default(0)
            .interact_text()?;
        (text, number)
    } else {
        (String::new(), 0)
    };

    let (screen, client, session) = app.parts();
    if let Some(Screen::Dashboard(dashboard)) = screen {
        match action {
            0 => dashboard.fetch_hello(client, session).await,
            1 => dashboard.fetch_time(client, session).await,
            _ => {
                dashboard.echo_input = echo_text;
                dashboard.echo_number = echo_number;
                dashboard.post_echo(client, session).await;
            }
        }
    }
    Ok(true)
}

fn prompt_style(theme: &ColorfulTheme, prompt: &str, current: QrStyle) -> Result<QrStyle> {
    let names: Vec<&str> = QrStyle::ALL.iter().map(|s| s.as_str()).collect();
    let default = QrStyle::ALL.iter().position(|s| *s == current).unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&names)
        .default(default)
        .interact()?;
    Ok(QrStyle::ALL[index])
}

fn prompt_color(theme: &ColorfulTheme, prompt: &str, current: &str) -> Result<String> {
    let color: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .default(current.to_string())
        .validate_with(|input: &String| HexColor::parse(input).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(color)
}

async fn create_screen(app: &mut App, theme: &ColorfulTheme) -> Result<bool> {
    print_header(app, Route::CreateQr);

    if let Some(Screen::CreateQr(create)) = app.parts().0 {
        let req = &create.request;
        print_field("URL", if req.url.is_empty() { "-" } else { req.url.as_str() });
        print_field(
            "Style",
            &format!(
                "dots {}, eyes {}, {} on {}",
                req.dot_style, req.eye_style, req.fill_color, req.back_color
            ),
        );
        if let Some(image) = &create.qr_code {
            let state = if create.saved { "saved" } else { "generated" };
            print_field("QR code", &format!("{} ({} bytes base64)", state, image.base64().len()));
        }
        if let Some(message) = &create.error {
            error(message);
        }
    }

    let actions = ["Enter URL", "Choose style", "Generate QR", "Save QR", "Download QR"];
    let action = match pick(app, theme, &actions)? {
        Choice::Action(action) => action,
        Choice::Navigated(keep_going) => return Ok(keep_going),
    };

    let (screen, client, session) = app.parts();
    let Some(Screen::CreateQr(create)) = screen else {
        return Ok(true);
    };

    match action {
        0 => {
            create.request.url = Input::with_theme(theme)
                .with_prompt("Enter URL to generate QR code")
                .with_initial_text(create.request.url.clone())
                .interact_text()?;
        }
        1 => {
            create.request.dot_style = prompt_style(theme, "Dot style", create.request.dot_style)?;
            create.request.eye_style = prompt_style(theme, "Eye style", create.request.eye_style)?;
            create.request.fill_color = prompt_color(theme, "Fill color", &create.request.fill_color)?;
            create.request.back_color = prompt_color(theme, "Back color", &create.request.back_color)?;
        }
        2 => {
            let pb = spinner("Generating...");
            create.generate(client, session).await;
            pb.finish_and_clear();
        }
        3 => {
            let pb = spinner("Saving...");
            create.save(client, session).await;
            pb.finish_and_clear();
        }
        _ => match create.download(&PathBuf::from(".")) {
            Some(Ok(path)) => success(&format!("Wrote {}", path.display())),
            Some(Err(e)) => error(&e.to_string()),
            None => info("Generate a QR code first"),
        },
    }
    Ok(true)
}

async fn manage_screen(app: &mut App, theme: &ColorfulTheme) -> Result<bool> {
    print_header(app, Route::ManageQr);

    let ids: Vec<i64> = match app.parts().0 {
        Some(Screen::ManageQr(manage)) => {
            if let Some(message) = &manage.error {
                error(message);
            }
            print_qr_table(&manage.records);
            manage.records.iter().map(|r| r.id).collect()
        }
        _ => Vec::new(),
    };

    let action = match pick(app, theme, &["Refresh", "Delete", "Download"])? {
        Choice::Action(action) => action,
        Choice::Navigated(keep_going) => return Ok(keep_going),
    };

    let (screen, client, session) = app.parts();
    let Some(Screen::ManageQr(manage)) = screen else {
        return Ok(true);
    };

    if action == 0 {
        manage.load(client, session).await;
        return Ok(true);
    }
    if ids.is_empty() {
        info("No QR codes generated yet.");
        return Ok(true);
    }

    let labels: Vec<String> = manage
        .records
        .iter()
        .map(|r| format!("#{} {} ({})", r.id, r.url, format_created(r)))
        .collect();
    let index = Select::with_theme(theme)
        .with_prompt("QR code")
        .items(&labels)
        .default(0)
        .interact()?;
    let id = ids[index];

    if action == 1 {
        manage.delete(client, session, id, confirm).await;
    } else if let Some(record) = manage.find(id) {
        match manage.download(record, &PathBuf::from(".")) {
            Ok(path) => success(&format!("Wrote {}", path.display())),
            Err(e) => error(&e.to_string()),
        }
    }
    Ok(true)
}
