//! Math Quest entry point
//!
//! Web: wires the DOM to the session controller and runs its timers.
//! Native: a text-mode version over stdin for quick play-testing.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement, KeyboardEvent};

    use math_quest::audio::AudioManager;
    use math_quest::platform::{LocalStorage, init_logging};
    use math_quest::session::{Effect, GameMode, Screen, Verdict};
    use math_quest::{Controller, Operation, Settings, Tuning};

    type WebController = Controller<LocalStorage, Pcg32>;

    /// Screen id for each state
    const SCREENS: [(Screen, &str); 5] = [
        (Screen::Menu, "menu"),
        (Screen::ChallengeMenu, "challenge-menu"),
        (Screen::Playing, "playing"),
        (Screen::GameOver, "game-over"),
        (Screen::HighScores, "high-scores"),
    ];

    /// App instance holding all state
    struct App {
        controller: WebController,
        audio: AudioManager,
        settings: Settings,
        /// Settings live in their own LocalStorage key
        settings_store: LocalStorage,
        /// Running countdown interval and its callback
        interval: Option<(i32, JsValue)>,
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn input(id: &str) -> Option<HtmlInputElement> {
        document()?.get_element_by_id(id)?.dyn_into().ok()
    }

    fn input_value(id: &str) -> String {
        input(id).map(|el| el.value()).unwrap_or_default()
    }

    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Missing element #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Run every queued effect, then redraw
    fn process_effects(app: &Rc<RefCell<App>>) {
        let effects = app.borrow_mut().controller.drain_effects();
        for effect in effects {
            match effect {
                Effect::ProblemReady(_) => {
                    for id in ["answer-input", "factor-a", "factor-b"] {
                        if let Some(el) = input(id) {
                            el.set_value("");
                        }
                    }
                }
                Effect::ScheduleAdvance { ticket, delay_ms } => {
                    let app2 = app.clone();
                    let callback = Closure::once_into_js(move || {
                        app2.borrow_mut().controller.advance(ticket);
                        process_effects(&app2);
                    });
                    if let Some(w) = web_sys::window() {
                        let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                            callback.unchecked_ref(),
                            delay_ms as i32,
                        );
                    }
                }
                Effect::StartCountdown { ticket, .. } => {
                    stop_interval(app);
                    let app2 = app.clone();
                    let callback = Closure::<dyn FnMut()>::new(move || {
                        app2.borrow_mut().controller.tick(ticket);
                        process_effects(&app2);
                    })
                    .into_js_value();
                    if let Some(w) = web_sys::window() {
                        match w.set_interval_with_callback_and_timeout_and_arguments_0(
                            callback.unchecked_ref(),
                            1000,
                        ) {
                            Ok(handle) => app.borrow_mut().interval = Some((handle, callback)),
                            Err(e) => log::warn!("Failed to start countdown: {:?}", e),
                        }
                    }
                }
                Effect::StopCountdown => stop_interval(app),
                Effect::PlayCue(cue) => app.borrow().audio.play(cue),
                Effect::LevelUp { level } => log::info!("Reached level {}", level),
                Effect::GameOver { score, .. } => log::info!("Final score {}", score),
                Effect::Feedback(_) | Effect::CountdownTick { .. } => {}
            }
        }
        render(&app.borrow());
        focus_answer(&app.borrow());
    }

    fn stop_interval(app: &Rc<RefCell<App>>) {
        let interval = app.borrow_mut().interval.take();
        if let (Some((handle, _)), Some(w)) = (interval, web_sys::window()) {
            w.clear_interval_with_handle(handle);
        }
    }

    fn focus_answer(app: &App) {
        let session = app.controller.session();
        if !session.is_playing() || app.controller.is_awaiting_next() {
            return;
        }
        let id = match &session.problem {
            Some(p) if p.is_factor() => "factor-a",
            _ => "answer-input",
        };
        if let Some(el) = document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.focus();
        }
    }

    /// Update the DOM from session state
    fn render(app: &App) {
        let session = app.controller.session();

        for (screen, id) in SCREENS {
            set_hidden(id, session.screen != screen);
        }

        set_text("hud-level", &session.level.to_string());
        set_text("hud-lives", &"♥".repeat(session.lives as usize));
        set_text("hud-score", &session.score.to_string());
        set_text(
            "hud-progress",
            &format!(
                "{}/{}",
                session.score_in_level,
                app.controller.tuning().points_to_level_up
            ),
        );

        match &session.countdown {
            Some(c) => {
                set_hidden("hud-timer", false);
                set_text("hud-timer-text", &format!("{}s", c.remaining_secs));
                if let Some(el) = document().and_then(|d| d.get_element_by_id("hud-timer-fill")) {
                    let width = c.fraction_left() * 100.0;
                    let _ = el.set_attribute("style", &format!("width: {:.0}%", width));
                }
            }
            None => set_hidden("hud-timer", !session.is_timed() || !session.is_playing()),
        }

        if let Some(problem) = &session.problem {
            set_text("question", &problem.question);
            set_hidden("single-input", problem.is_factor());
            set_hidden("factor-inputs", !problem.is_factor());
        }

        match &session.feedback {
            Some(f) => {
                set_text("feedback", &f.message);
                if let Some(el) = document().and_then(|d| d.get_element_by_id("feedback")) {
                    let class = match f.verdict {
                        Verdict::Correct => "feedback correct",
                        Verdict::Incorrect | Verdict::TimeUp => "feedback incorrect",
                    };
                    let _ = el.set_attribute("class", class);
                }
            }
            None => set_text("feedback", ""),
        }

        if session.screen == Screen::GameOver {
            set_text("final-score", &session.score.to_string());
            set_text("final-level", &session.level.to_string());
            set_hidden("new-high-score", !session.new_high_score);
            let best = app
                .controller
                .high_scores()
                .best(session.mode, session.operation)
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string());
            set_text("final-best", &best);
        }

        if session.screen == Screen::HighScores {
            render_high_scores(app);
        }

        set_text(
            "sound-toggle",
            if app.settings.sound_enabled {
                "🔊 Sound on"
            } else {
                "🔇 Sound off"
            },
        );
    }

    fn render_high_scores(app: &App) {
        let Some(el) = document().and_then(|d| d.get_element_by_id("high-scores-list")) else {
            return;
        };
        let hs = app.controller.high_scores();
        let mut html = String::new();
        for mode in GameMode::ALL {
            html.push_str(&format!("<h3>{}</h3><dl>", mode.label()));
            for op in Operation::ALL {
                let scores = hs.scores(mode, op);
                let text = if scores.is_empty() {
                    "-".to_string()
                } else {
                    scores
                        .iter()
                        .map(u32::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                html.push_str(&format!("<dt>{}</dt><dd>{}</dd>", op.label(), text));
            }
            html.push_str("</dl>");
        }
        el.set_inner_html(&html);
    }

    fn submit(app: &Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.controller.set_answer_input(&input_value("answer-input"));
            a.controller
                .set_factor_inputs(&input_value("factor-a"), &input_value("factor-b"));
            a.controller.submit_answer();
        }
        process_effects(app);
    }

    /// Register a button that runs a controller command
    fn command(app: &Rc<RefCell<App>>, id: &str, f: impl Fn(&mut WebController) + 'static) {
        let app = app.clone();
        on_click(id, move || {
            {
                let Ok(mut a) = app.try_borrow_mut() else {
                    return;
                };
                a.audio.resume();
                f(&mut a.controller);
            }
            process_effects(&app);
        });
    }

    fn setup_handlers(app: &Rc<RefCell<App>>) {
        for op in Operation::ALL {
            command(app, &format!("classic-{}", op.as_str()), move |c| {
                c.select_operation_and_start(op)
            });
            command(app, &format!("challenge-{}", op.as_str()), move |c| {
                c.start_challenge(op)
            });
        }
        command(app, "challenge-button", |c| c.show_challenge_menu());
        command(app, "high-scores-button", |c| c.view_high_scores());
        command(app, "play-again-button", |c| c.play_again());
        for id in [
            "menu-button-challenge",
            "menu-button-playing",
            "menu-button-game-over",
            "menu-button-high-scores",
        ] {
            command(app, id, |c| c.go_to_menu());
        }

        {
            let app = app.clone();
            on_click("submit-button", move || submit(&app));
        }

        {
            let app = app.clone();
            on_click("sound-toggle", move || {
                {
                    let mut guard = app.borrow_mut();
                    let a = &mut *guard;
                    a.settings.toggle_sound();
                    a.settings.save(&mut a.settings_store);
                    a.audio.apply_settings(&a.settings);
                }
                render(&app.borrow());
            });
        }

        // Enter submits from any answer field
        if let Some(document) = document() {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" && app.borrow().controller.session().is_playing() {
                    event.prevent_default();
                    submit(&app);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        init_logging();
        log::info!("Math Quest starting...");

        let seed = js_sys::Date::now() as u64;
        let settings_store = LocalStorage::new();
        let settings = Settings::load(&settings_store);
        let tuning = Tuning::load(&settings_store);
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let app = Rc::new(RefCell::new(App {
            controller: Controller::with_tuning(
                LocalStorage::new(),
                Pcg32::seed_from_u64(seed),
                tuning,
            ),
            audio,
            settings,
            settings_store,
            interval: None,
        }));
        log::info!("Game initialized with seed: {}", seed);

        set_hidden("loading", true);
        setup_handlers(&app);
        render(&app.borrow());

        log::info!("Math Quest running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod text_game {
    use std::fs;
    use std::io::{self, BufRead, Write};
    use std::thread;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use math_quest::platform::{MemoryStore, init_logging};
    use math_quest::session::{Effect, GameMode, Ticket};
    use math_quest::{Controller, Operation, Tuning};

    type TextController = Controller<MemoryStore, Pcg32>;

    fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> Option<String> {
        print!("{}", text);
        let _ = io::stdout().flush();
        lines.next()?.ok()
    }

    fn print_menu() {
        println!("\n=== Math Quest ===");
        let ops: Vec<&str> = Operation::ALL.iter().map(|op| op.as_str()).collect();
        println!("Operations: {}", ops.join(", "));
        println!("Type an operation to play, 'challenge <op>' for timed play,");
        println!("'scores' for high scores, or 'quit'.");
    }

    fn print_high_scores(c: &TextController) {
        for mode in GameMode::ALL {
            println!("\n{}", mode.label());
            for op in Operation::ALL {
                let scores = c.high_scores().scores(mode, op);
                if !scores.is_empty() {
                    println!("  {:<16} {:?}", op.label(), scores);
                }
            }
        }
    }

    /// Play until game over or the player leaves
    fn play(c: &mut TextController, lines: &mut impl Iterator<Item = io::Result<String>>) {
        // (ticket, started, seconds already applied)
        let mut countdown: Option<(Ticket, Instant, u64)> = None;
        let mut effects = c.drain_effects();

        loop {
            let mut advance = None;
            for effect in effects.drain(..) {
                match effect {
                    Effect::ProblemReady(problem) => {
                        let s = c.session();
                        println!(
                            "\n[level {} | lives {} | score {}]",
                            s.level, s.lives, s.score
                        );
                        println!("{}", problem.question);
                        if problem.is_factor() {
                            println!("(type two numbers separated by a space)");
                        }
                    }
                    Effect::StartCountdown { ticket, secs } => {
                        println!("You have {} seconds!", secs);
                        countdown = Some((ticket, Instant::now(), 0));
                    }
                    Effect::StopCountdown => countdown = None,
                    Effect::Feedback(feedback) => println!("{}", feedback.message),
                    Effect::LevelUp { level } => println!("*** Level up! Welcome to level {} ***", level),
                    Effect::ScheduleAdvance { ticket, delay_ms } => advance = Some((ticket, delay_ms)),
                    Effect::GameOver {
                        score,
                        level,
                        new_high_score,
                    } => {
                        println!("\nGame over! Score {} (level {})", score, level);
                        if new_high_score {
                            println!("New high score!");
                        }
                        let s = c.session();
                        if let Some(best) = c.high_scores().best(s.mode, s.operation) {
                            println!("Best so far: {}", best);
                        }
                        return;
                    }
                    Effect::CountdownTick { .. } | Effect::PlayCue(_) => {}
                }
            }

            if let Some((ticket, delay_ms)) = advance {
                thread::sleep(Duration::from_millis(delay_ms as u64));
                c.advance(ticket);
                effects = c.drain_effects();
                continue;
            }

            let Some(line) = prompt(lines, "> ") else {
                c.go_to_menu();
                return;
            };
            let line = line.trim();
            if line == "menu" || line == "quit" {
                c.go_to_menu();
                return;
            }

            // Apply the seconds that passed while the player was typing
            if let Some((ticket, started, applied)) = countdown.as_mut() {
                let elapsed = started.elapsed().as_secs();
                while *applied < elapsed && c.session().countdown.is_some() {
                    c.tick(*ticket);
                    *applied += 1;
                }
            }

            let mut parts = line.split(|ch: char| ch.is_whitespace() || ch == ',');
            let first = parts.next().unwrap_or("");
            let second = parts.find(|p| !p.is_empty()).unwrap_or("");
            c.set_answer_input(line);
            c.set_factor_inputs(first, second);
            c.submit_answer();
            effects = c.drain_effects();
        }
    }

    /// Balance override from the JSON file named on the command line
    fn load_tuning() -> Tuning {
        let Some(path) = std::env::args().nth(1) else {
            return Tuning::default();
        };
        match fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        init_logging();
        log::info!("Math Quest (native) starting...");

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let mut c = Controller::with_tuning(
            MemoryStore::new(),
            Pcg32::seed_from_u64(seed),
            load_tuning(),
        );

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print_menu();
            let Some(line) = prompt(&mut lines, "menu> ") else {
                break;
            };
            let mut words = line.split_whitespace();
            match words.next() {
                Some("quit") | Some("q") => break,
                Some("scores") => {
                    c.view_high_scores();
                    print_high_scores(&c);
                    c.go_to_menu();
                }
                Some("challenge") => match words.next().and_then(Operation::from_str) {
                    Some(op) => {
                        c.show_challenge_menu();
                        c.start_challenge(op);
                        play(&mut c, &mut lines);
                        c.go_to_menu();
                    }
                    None => println!("Pick an operation, e.g. 'challenge add'"),
                },
                Some(word) => match Operation::from_str(word) {
                    Some(op) => {
                        c.select_operation_and_start(op);
                        play(&mut c, &mut lines);
                        c.go_to_menu();
                    }
                    None => println!("Unknown choice '{}'", word),
                },
                None => {}
            }
        }

        log::info!("Bye!");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    text_game::run();
}
