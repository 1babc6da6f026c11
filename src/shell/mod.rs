//! Shell Module
//!
//! Top-level dispatch: turns surface input into window manager, taskbar,
//! launcher and terminal operations, and collects the resulting events.

pub mod launcher;
pub mod panel;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use webtop_ipc::{Key, Modifiers, OutputPayload, ShellCommand, WindowControl, WmEvent};
use webtop_terminal::{
    Appearance, CommandContext, CommandOutput, EditKey, Effect, Execution, Host, KeyOutcome,
    KvStore, Terminal, TerminalOptions, content,
};

use crate::config::Config;
use crate::shared::{WindowId, WindowKind};
use crate::wm::focus::FocusSource;
use crate::wm::keyboard::{KeyboardAction, KeyboardManager};
use crate::wm::{WindowManager, WmResult};

use self::launcher::Launcher;
use self::panel::{Panel, PanelClickAction};

/// Shell state
pub struct Shell<H: Host> {
    pub wm: WindowManager,
    pub panel: Panel,
    pub launcher: Launcher,
    pub terminal: Terminal,
    keyboard: KeyboardManager,
    appearance: Appearance,
    /// Fields edited with `edit <field> <value>`
    profile: BTreeMap<String, String>,
    host: H,
    outbox: Vec<WmEvent>,
}

impl<H: Host> Shell<H> {
    /// Create a new shell
    pub fn new(config: &Config, store: Box<dyn KvStore>, host: H) -> Self {
        let wm = WindowManager::new(config);

        let mut apps: Vec<String> = config.windows.iter().map(|w| w.id.clone()).collect();
        apps.push(WindowKind::Home.as_str().to_string());

        let terminal = Terminal::new(
            TerminalOptions {
                prompt: config.terminal.prompt.clone(),
                history_limit: config.terminal.history_limit,
                history_key: config.terminal.history_key.clone(),
            },
            store,
        );

        Self {
            wm,
            panel: Panel::new(),
            launcher: Launcher::new(apps),
            terminal,
            keyboard: KeyboardManager::new(),
            appearance: Appearance::default(),
            profile: BTreeMap::new(),
            host,
            outbox: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn profile(&self) -> &BTreeMap<String, String> {
        &self.profile
    }

    /// Startup: the log opens with the help text
    pub fn boot(&mut self) -> Vec<WmEvent> {
        info!("Shell starting");
        self.run_line("help");
        self.take_events()
    }

    /// Handle one surface command
    pub fn handle(&mut self, command: ShellCommand) -> Vec<WmEvent> {
        debug!("Shell command: {:?}", command);

        match command {
            ShellCommand::ActivateIcon { app } => {
                self.dismiss_launcher();
                self.activate(&app, FocusSource::Icon);
            }
            ShellCommand::DesktopClick => self.dismiss_launcher(),
            ShellCommand::LauncherButton => self.toggle_launcher(),
            ShellCommand::LauncherSelect { app } => {
                if self.launcher.select(&app) {
                    self.emit(WmEvent::LauncherToggled { visible: false });
                    self.activate(&app, FocusSource::Launcher);
                } else {
                    warn!("Launcher has no entry {}", app);
                }
            }
            ShellCommand::TaskbarClick { id } => {
                self.dismiss_launcher();
                self.taskbar_click(&id);
            }
            ShellCommand::WindowMouseDown { id } => {
                self.dismiss_launcher();
                check(self.wm.focus(&id, FocusSource::Pointer));
            }
            ShellCommand::HeaderMouseDown { id, x, y } => {
                self.dismiss_launcher();
                check(self.wm.focus(&id, FocusSource::Pointer));
                check(self.wm.begin_drag(&id, x, y));
            }
            ShellCommand::HeaderDoubleClick { id } => check(self.wm.toggle_maximize(&id)),
            ShellCommand::PointerMove { x, y } => self.wm.update_drag(x, y),
            ShellCommand::PointerUp => check(self.wm.end_drag()),
            ShellCommand::Control { id, control } => check(match control {
                WindowControl::Minimize => self.wm.minimize(&id),
                WindowControl::Maximize => self.wm.toggle_maximize(&id),
                WindowControl::Close => self.wm.close(&id),
            }),
            ShellCommand::KeyDown { key, modifiers } => self.key_down(key, modifiers),
            ShellCommand::KeyUp { key } => {
                if let Some(action) = self.keyboard.handle_key_release(key) {
                    self.run_action(action);
                }
            }
            ShellCommand::TerminalInput { text } => self.terminal.set_input(&text),
            ShellCommand::RunCommand { line } => self.run_line(&line),
            ShellCommand::CopyEntry { index } => {
                if !self.terminal.copy_entry(index, &mut self.host) {
                    debug!("No output entry {}", index);
                }
            }
            ShellCommand::ViewportResized { width, height } => self.wm.set_viewport(width, height),
            ShellCommand::TransitionElapsed { id, generation } => {
                if let Err(e) = self.wm.finish_transition(&id, generation) {
                    warn!("{}", e);
                }
            }
            ShellCommand::Sync => {
                let windows = self.wm.snapshot();
                let focused_window = self.wm.focused().map(str::to_string);
                self.emit(WmEvent::SyncState {
                    windows,
                    focused_window,
                });
            }
        }

        self.take_events()
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Move window manager events into the outbox, keeping the taskbar in sync
    fn flush_wm(&mut self) {
        let events = self.wm.drain_events();
        if events.is_empty() {
            return;
        }

        let mut taskbar_changed = false;
        for event in &events {
            taskbar_changed |= self.panel.apply(event);
        }
        self.outbox.extend(events);
        if taskbar_changed {
            self.outbox.push(WmEvent::TaskbarUpdated {
                buttons: self.panel.buttons(),
            });
        }
    }

    fn emit(&mut self, event: WmEvent) {
        self.flush_wm();
        self.outbox.push(event);
    }

    fn take_events(&mut self) -> Vec<WmEvent> {
        self.flush_wm();
        std::mem::take(&mut self.outbox)
    }

    // ------------------------------------------------------------------
    // Windows
    // ------------------------------------------------------------------

    fn resolve(&mut self, app: &str) -> Option<WindowId> {
        if self.wm.client(app).is_some() {
            return Some(app.to_string());
        }
        let kind = WindowKind::from_name(app);
        if kind.is_dynamic() {
            return Some(self.wm.ensure_dynamic(kind));
        }
        self.wm.find_kind(kind).map(|c| c.id.clone())
    }

    /// Desktop icon / launcher activation: open and focus
    fn activate(&mut self, app: &str, source: FocusSource) {
        let Some(id) = self.resolve(app) else {
            warn!("No window for app {}", app);
            return;
        };
        check(self.open_and_focus(&id, source));

        let is_settings = self.wm.client(&id).map(|c| c.kind) == Some(WindowKind::Settings);
        if is_settings && source == FocusSource::Icon {
            if let Some(terminal) = self.wm.find_kind(WindowKind::Terminal).map(|c| c.id.clone()) {
                check(self.open_and_focus(&terminal, source));
            }
            let index = self.terminal.append_notice(content::SETTINGS_WELCOME);
            self.emit_record(index);
        }
    }

    fn open_and_focus(&mut self, id: &str, source: FocusSource) -> WmResult<()> {
        self.wm.open(id)?;
        self.wm.focus(id, source)
    }

    fn taskbar_click(&mut self, id: &str) {
        let Some(client) = self.wm.client(id) else {
            warn!("Taskbar click on unknown window {}", id);
            return;
        };
        let action = Panel::click_action(client, self.wm.focused() == Some(id));
        debug!("Taskbar click on {}: {:?}", id, action);

        check(match action {
            PanelClickAction::OpenAndFocus => self.open_and_focus(id, FocusSource::Taskbar),
            PanelClickAction::Minimize => self.wm.minimize(id),
            PanelClickAction::Focus => self.wm.focus(id, FocusSource::Taskbar),
        });
    }

    fn toggle_launcher(&mut self) {
        let visible = self.launcher.toggle();
        self.emit(WmEvent::LauncherToggled { visible });
    }

    fn dismiss_launcher(&mut self) {
        if self.launcher.hide() {
            self.emit(WmEvent::LauncherToggled { visible: false });
        }
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        if let Some(action) = self.keyboard.handle_key_press(key, modifiers) {
            self.run_action(action);
            return;
        }

        let terminal_active = self.wm.active_window().map(|c| c.kind) == Some(WindowKind::Terminal);
        if !terminal_active {
            return;
        }
        if let Some(edit) = edit_key(key, modifiers) {
            self.terminal_key(edit);
        }
    }

    fn run_action(&mut self, action: KeyboardAction) {
        match action {
            KeyboardAction::CycleWindows(direction) => {
                let order = self.panel.order();
                self.wm.cycle(direction, &order);
            }
            KeyboardAction::CommitCycle => {
                if let Err(e) = self.wm.commit_cycle() {
                    warn!("{}", e);
                }
            }
            KeyboardAction::CloseWindow => {
                if let Some(id) = self.wm.focused().map(str::to_string) {
                    check(self.wm.close(&id));
                }
            }
            KeyboardAction::SnapWindow(edge) => {
                if let Some(id) = self.wm.focused().map(str::to_string) {
                    check(self.wm.snap(&id, edge));
                }
            }
            KeyboardAction::ToggleTerminal => self.toggle_terminal(),
            KeyboardAction::ToggleLauncher => self.toggle_launcher(),
        }
    }

    /// Alt+`: only while a settings or profile window provides the context
    fn toggle_terminal(&mut self) {
        let in_context = matches!(
            self.wm.context_window().map(|c| c.kind),
            Some(WindowKind::Settings | WindowKind::Profile)
        );
        if !in_context {
            debug!("Terminal toggle ignored outside settings/profile");
            return;
        }
        let Some(terminal) = self.wm.find_kind(WindowKind::Terminal) else {
            return;
        };
        let id = terminal.id.clone();
        let shown = terminal.state.is_shown();

        if shown && self.wm.focused() == Some(id.as_str()) {
            check(self.wm.minimize(&id));
        } else {
            check(self.open_and_focus(&id, FocusSource::Pointer));
        }
    }

    // ------------------------------------------------------------------
    // Terminal
    // ------------------------------------------------------------------

    fn context(&self) -> CommandContext {
        match self.wm.context_window().map(|c| c.kind) {
            Some(WindowKind::Settings) => CommandContext::Settings,
            Some(WindowKind::Profile) => CommandContext::Profile,
            _ => CommandContext::Global,
        }
    }

    fn terminal_key(&mut self, key: EditKey) {
        let context = self.context();
        match self.terminal.handle_key(key, context, &mut self.host) {
            KeyOutcome::Executed(execution) => {
                self.after_execution(execution);
                if key == EditKey::Enter {
                    self.emit(WmEvent::TerminalInputChanged {
                        text: String::new(),
                    });
                }
            }
            KeyOutcome::Interrupted(index) => {
                self.emit_record(index);
                self.emit(WmEvent::TerminalInputChanged {
                    text: String::new(),
                });
            }
            KeyOutcome::BufferChanged => {
                let text = self.terminal.input().to_string();
                self.emit(WmEvent::TerminalInputChanged { text });
            }
            KeyOutcome::Unchanged => {}
        }
    }

    /// Execute one line in the current context
    pub fn run_line(&mut self, line: &str) {
        let context = self.context();
        info!("Executing '{}' in {:?} context", line, context);
        let execution = self.terminal.execute(line, context, &mut self.host);
        self.after_execution(execution);
    }

    fn after_execution(&mut self, execution: Execution) {
        if execution.cleared_log() {
            self.emit(WmEvent::TerminalCleared);
        }
        self.emit_record(execution.index);

        for effect in execution.effects {
            self.apply_effect(effect);
        }
    }

    fn emit_record(&mut self, index: usize) {
        let Some(record) = self.terminal.log().get(index) else {
            return;
        };
        let event = WmEvent::TerminalOutput {
            index,
            prompt: self.terminal.prompt().to_string(),
            command: record.command.clone(),
            output: payload(&record.output),
        };
        self.emit(event);
    }

    fn apply_effect(&mut self, effect: Effect) {
        if self.appearance.apply(&effect) {
            let a = self.appearance;
            info!("Appearance changed: {:?}", a);
            self.emit(WmEvent::AppearanceChanged {
                theme: a.theme.as_str().to_string(),
                font_size: a.font_size,
                layout: a.layout.as_str().to_string(),
                animations: a.animations,
            });
            return;
        }

        match effect {
            Effect::EditProfile { field, value } => {
                info!("Profile field {} updated", field);
                self.profile.insert(field, value);
            }
            Effect::CloseContext(context) => {
                let kind = match context {
                    CommandContext::Settings => WindowKind::Settings,
                    CommandContext::Profile => WindowKind::Profile,
                    CommandContext::Global => return,
                };
                let ids: Vec<WindowId> = [kind, WindowKind::Terminal]
                    .iter()
                    .filter_map(|k| self.wm.find_kind(*k).map(|c| c.id.clone()))
                    .collect();
                for id in ids {
                    check(self.wm.close(&id));
                }
            }
            // ClearLog is reported by `after_execution`; appearance handled above
            _ => {}
        }
    }
}

/// Terminal editing key for a raw key press
fn edit_key(key: Key, modifiers: Modifiers) -> Option<EditKey> {
    if modifiers == Modifiers::CTRL {
        return match key {
            Key::Char(c) if c.eq_ignore_ascii_case(&'l') => Some(EditKey::ClearScreen),
            Key::Char(c) if c.eq_ignore_ascii_case(&'c') => Some(EditKey::Interrupt),
            _ => None,
        };
    }
    if !modifiers.is_empty() {
        return None;
    }
    match key {
        Key::Enter => Some(EditKey::Enter),
        Key::ArrowUp => Some(EditKey::Up),
        Key::ArrowDown => Some(EditKey::Down),
        Key::Tab => Some(EditKey::Tab),
        _ => None,
    }
}

fn payload(output: &CommandOutput) -> OutputPayload {
    match output {
        CommandOutput::Empty => OutputPayload::Empty,
        CommandOutput::Text(text) => OutputPayload::Text(text.clone()),
        CommandOutput::Block(id) => OutputPayload::Block(id.as_str().to_string()),
    }
}

/// Unknown windows are a no-op for the surface
fn check(result: WmResult<()>) {
    if let Err(e) = result {
        warn!("Ignoring window operation: {}", e);
    }
}
