//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::{App, CreateQrView, DashboardView, ManageQrView};
use crate::cli::{
    confirm, error, info, print_qr_table, spinner, success, warn, OutputFormat, QrAction,
    StyleArgs,
};
use crate::client::ApiClient;
use crate::config::{self, Config};
use crate::error::Error;
use crate::session::SessionStore;

/// Everything a client command needs: configuration, the HTTP client and
/// the session context
pub struct Context {
    pub config: Config,
    pub client: ApiClient,
    pub session: SessionStore,
}

impl Context {
    pub fn load(config_path: Option<&Path>, api_base: Option<String>) -> Result<Self> {
        let mut config = config::load_config_or_default(config_path)?;
        if let Some(api_base) = api_base {
            config.client.api_base = api_base;
        }

        let client = ApiClient::from_config(&config.client)?;
        let session = SessionStore::open(config.client.session_path());
        tracing::debug!("API base {}, session {:?}", client.base(), session.path());

        Ok(Self {
            config,
            client,
            session,
        })
    }
}

/// Initialize a new qrdash.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("qrdash.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created qrdash.toml");
    info("Run 'qrdash serve' to start a local API, then 'qrdash signup --username <name>'");

    Ok(())
}

/// Log in with username and password
pub async fn login(mut ctx: Context, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => dialoguer::Password::new().with_prompt("Password").interact()?,
    };

    let pb = spinner("Logging in...");
    let result = ctx.client.login(&mut ctx.session, username, &password).await;
    pb.finish_and_clear();

    match result {
        Ok(session) => {
            success(&format!("Logged in as {}", session.username));
            Ok(())
        }
        Err(e) => {
            error(&format!("Login failed: {}", e));
            Err(e.into())
        }
    }
}

/// Create an account
pub async fn signup(
    mut ctx: Context,
    username: &str,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    let pb = spinner("Creating account...");
    let result = ctx
        .client
        .signup(&mut ctx.session, username, &email, &password)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(session) => {
            success(&format!("Signed up and logged in as {}", session.username));
            Ok(())
        }
        Err(e) => {
            error(&format!("Signup failed: {}", e));
            Err(e.into())
        }
    }
}

/// Forget the stored session
pub async fn logout(mut ctx: Context) -> Result<()> {
    if !ctx.session.is_authenticated() {
        info("Not logged in");
        return Ok(());
    }
    ctx.session.clear()?;
    success("Logged out");
    Ok(())
}

/// Show who is logged in
pub async fn whoami(ctx: Context) -> Result<()> {
    match ctx.session.username() {
        Some(username) => println!("{}", username),
        None => warn("Not logged in"),
    }
    Ok(())
}

/// GET /api/hello
pub async fn hello(ctx: Context) -> Result<()> {
    let mut view = DashboardView::new();
    view.fetch_hello(&ctx.client, &ctx.session).await;
    report(view.error, view.hello_response)
}

/// GET /api/time
pub async fn time(ctx: Context) -> Result<()> {
    let mut view = DashboardView::new();
    view.fetch_time(&ctx.client, &ctx.session).await;
    report(view.error, view.time_response)
}

/// POST /api/echo
pub async fn echo(ctx: Context, text: &str, number: i64) -> Result<()> {
    let mut view = DashboardView::new();
    view.echo_input = text.to_string();
    view.echo_number = number;
    view.post_echo(&ctx.client, &ctx.session).await;
    report(view.error, view.echo_response)
}

fn report(failure: Option<String>, response: Option<String>) -> Result<()> {
    if let Some(message) = failure {
        error(&message);
        return Err(Error::Api(message).into());
    }
    if let Some(response) = response {
        println!("{}", response);
    }
    Ok(())
}

/// QR code commands
pub async fn qr(ctx: Context, action: QrAction) -> Result<()> {
    if !ctx.session.is_authenticated() {
        return Err(Error::NotAuthenticated.into());
    }

    match action {
        QrAction::Create { url, style, out } => create_qr(ctx, url, style, out).await,
        QrAction::Save { url, style } => save_qr(ctx, url, style).await,
        QrAction::List { format } => list_qr(ctx, format).await,
        QrAction::Delete { id, force } => delete_qr(ctx, id, force).await,
        QrAction::Download { id, dir } => download_qr(ctx, id, &dir).await,
    }
}

fn create_view(ctx: &Context, url: String, style: StyleArgs) -> CreateQrView {
    let mut view = CreateQrView::new(&ctx.config.qr);
    view.request.url = url;
    if let Some(dot_style) = style.dot_style {
        view.request.dot_style = dot_style;
    }
    if let Some(eye_style) = style.eye_style {
        view.request.eye_style = eye_style;
    }
    if let Some(fill_color) = style.fill_color {
        view.request.fill_color = fill_color;
    }
    if let Some(back_color) = style.back_color {
        view.request.back_color = back_color;
    }
    view
}

async fn create_qr(ctx: Context, url: String, style: StyleArgs, out: Option<PathBuf>) -> Result<()> {
    let mut view = create_view(&ctx, url, style);

    let pb = spinner("Generating QR code...");
    view.generate(&ctx.client, &ctx.session).await;
    pb.finish_and_clear();

    if let Some(message) = view.error {
        error(&message);
        return Err(Error::Api(message).into());
    }

    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    if let Some(written) = view.download(&dir) {
        success(&format!("Wrote {}", written?.display()));
    }
    Ok(())
}

async fn save_qr(ctx: Context, url: String, style: StyleArgs) -> Result<()> {
    let mut view = create_view(&ctx, url, style);

    let pb = spinner("Saving QR code...");
    view.save(&ctx.client, &ctx.session).await;
    pb.finish_and_clear();

    match view.error {
        Some(message) => {
            error(&message);
            Err(Error::Api(message).into())
        }
        None => {
            success(&format!("Saved QR code for {}", view.request.url));
            Ok(())
        }
    }
}

async fn load_manage_view(ctx: &Context) -> Result<ManageQrView> {
    let mut view = ManageQrView::new();
    view.load(&ctx.client, &ctx.session).await;
    if let Some(message) = &view.error {
        error(message);
        return Err(Error::Api(message.clone()).into());
    }
    Ok(view)
}

async fn list_qr(ctx: Context, format: OutputFormat) -> Result<()> {
    let view = load_manage_view(&ctx).await?;

    match format {
        OutputFormat::Table => print_qr_table(&view.records),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view.records)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&view.records)?),
    }

    Ok(())
}

async fn delete_qr(ctx: Context, id: i64, force: bool) -> Result<()> {
    let mut view = load_manage_view(&ctx).await?;

    let deleted = view
        .delete(&ctx.client, &ctx.session, id, |prompt| force || confirm(prompt))
        .await;

    if deleted {
        success(&format!("Deleted QR code {} ({} left)", id, view.records.len()));
        return Ok(());
    }
    match view.error {
        Some(message) => {
            error(&message);
            Err(Error::Api(message).into())
        }
        None => {
            info("Cancelled");
            Ok(())
        }
    }
}

async fn download_qr(ctx: Context, id: i64, dir: &Path) -> Result<()> {
    let view = load_manage_view(&ctx).await?;

    let record = view
        .find(id)
        .ok_or(Error::QrNotFound(id))?;
    let path = view.download(record, dir)?;
    success(&format!("Wrote {}", path.display()));
    Ok(())
}

/// Interactive mode
pub async fn app(ctx: Context) -> Result<()> {
    let app = App::new(ctx.client, ctx.session, ctx.config.qr);
    crate::cli::shell::run(app).await
}

/// Start the HTTP API server
pub async fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server at http://{}:{}/api", host, port));

    crate::api::run_server(config, &host, port).await?;
    Ok(())
}
