use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use discovery_core::Preferences;
use discovery_engine::{
    ApiGateway, FeedbackDispatcher, FileKeyValueStore, KeyValueStore, PreferenceStore,
    ReqwestGateway, SessionEngine, StarredStore,
};
use discovery_logging::{discovery_error, discovery_info, discovery_warn};

use super::commands::{Command, HELP};
use super::config::AppConfig;
use super::{logging, render};

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::initialize(config.log_destination);
    config.report_ignored();
    discovery_info!("State file {:?}", config.state_file);

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let gateway: Arc<dyn ApiGateway> =
        Arc::new(ReqwestGateway::new(config.gateway.clone()).context("building http client")?);
    let kv: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&config.state_file));
    let preferences = Arc::new(PreferenceStore::new(kv.clone()));

    let mut app = App {
        session: SessionEngine::new(gateway.clone(), preferences.clone()),
        dispatcher: FeedbackDispatcher::new(gateway, preferences.clone()),
        preferences,
        starred: StarredStore::new(kv),
        out: io::stdout(),
    };

    app.print(&["Type `help` for commands.".to_string()])?;
    runtime.block_on(app.session.initialize());
    app.render_if_dirty()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(usage) => {
                app.print(&[usage])?;
                continue;
            }
        };
        runtime.block_on(app.handle(command))?;
        app.render_if_dirty()?;
    }

    discovery_info!("Session closed");
    Ok(())
}

struct App {
    session: SessionEngine,
    dispatcher: FeedbackDispatcher,
    preferences: Arc<PreferenceStore>,
    starred: StarredStore,
    out: io::Stdout,
}

impl App {
    async fn handle(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Feedback(kind) => {
                let sent = self
                    .dispatcher
                    .submit_current(&mut self.session, kind)
                    .await;
                if let Err(err) = sent {
                    self.print(&[format!("feedback not sent: {err}")])?;
                }
            }
            Command::Star => {
                let Some(project) = self.session.current_project().cloned() else {
                    return self.print(&["nothing to star".to_string()]);
                };
                let line = match self.starred.add(&project) {
                    Ok(true) => format!("★ starred {}", project.name),
                    Ok(false) => format!("{} is already starred", project.name),
                    Err(err) => {
                        discovery_warn!("Starring {} failed: {}", project.url, err);
                        format!("could not star {}: {err}", project.name)
                    }
                };
                self.print(&[line])?;
            }
            Command::Starred => {
                let lines = render::render_starred(&self.starred.list());
                self.print(&lines)?;
            }
            Command::Unstar(url) => {
                let line = match self.starred.remove(&url) {
                    Ok(true) => format!("removed {url}"),
                    Ok(false) => format!("{url} was not starred"),
                    Err(err) => {
                        discovery_error!("Persisting starred projects failed: {}", err);
                        format!("could not update starred projects: {err}")
                    }
                };
                self.print(&[line])?;
            }
            Command::Prefs => {
                let lines = render::render_preferences(&self.preferences.load());
                self.print(&lines)?;
            }
            Command::TagAdd(tag) => {
                let current = self.preferences.load().tags;
                let line = match self.preferences.add_tag(&current, &tag) {
                    Ok(tags) if tags.len() == current.len() => format!("{tag:?} not added"),
                    Ok(tags) => format!("tags: {}", tags.join()),
                    Err(err) => format!("could not save tags: {err}"),
                };
                self.print(&[line])?;
            }
            Command::TagRemove(tag) => {
                let current = self.preferences.load().tags;
                let line = match self.preferences.remove_tag(&current, &tag) {
                    Ok(tags) => format!("tags: {}", tags.join()),
                    Err(err) => format!("could not save tags: {err}"),
                };
                self.print(&[line])?;
            }
            Command::Stars { min, max } => {
                let edited = Preferences {
                    min_stars: min,
                    max_stars: max,
                    ..self.preferences.load()
                };
                self.save_preferences(edited)?;
            }
            Command::Server(server_url) => {
                let edited = Preferences {
                    server_url,
                    ..self.preferences.load()
                };
                self.save_preferences(edited)?;
            }
            Command::Show => {
                let lines = self.session_lines();
                self.print(&lines)?;
            }
            Command::Help => self.print(&[HELP.to_string()])?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn save_preferences(&mut self, edited: Preferences) -> io::Result<()> {
        match self.preferences.save(edited) {
            Ok(saved) => {
                let mut lines = render::render_preferences(&saved);
                lines.push("(applies from the next batch)".to_string());
                self.print(&lines)
            }
            Err(err) => {
                discovery_error!("Persisting preferences failed: {}", err);
                self.print(&[format!("could not save preferences: {err}")])
            }
        }
    }

    fn session_lines(&self) -> Vec<String> {
        let view = self.session.view();
        let is_starred = view
            .current
            .as_ref()
            .is_some_and(|project| self.starred.contains(&project.url));
        render::render_session(&view, is_starred)
    }

    fn render_if_dirty(&mut self) -> io::Result<()> {
        if !self.session.consume_dirty() {
            return Ok(());
        }
        let lines = self.session_lines();
        self.print(&lines)
    }

    fn print(&mut self, lines: &[String]) -> io::Result<()> {
        let mut out = self.out.lock();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
        out.flush()
    }
}
