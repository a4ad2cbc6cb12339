use coach_core::*;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "zenith")]
#[command(about = "ZenithFit - AI fitness coaching for every age group", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use the built-in demo plan instead of the AI plan provider
    #[arg(long, global = true)]
    demo: bool,

    /// Override the tick interval in milliseconds (testing)
    #[arg(long, global = true)]
    tick_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and display the weekly plan
    Plan {
        /// Age group (kids, teens, adults, seniors)
        #[arg(long)]
        age_group: String,

        /// Print the raw plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a guided workout for one day of the plan
    Start {
        /// Age group (kids, teens, adults, seniors)
        #[arg(long)]
        age_group: String,

        /// Day to run: 1-7 or a weekday name (defaults to today)
        #[arg(long)]
        day: Option<String>,

        /// Run every exercise back to back without prompts
        #[arg(long)]
        auto: bool,
    },
}

fn main() -> Result<()> {
    coach_core::logging::init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let tick = Duration::from_millis(cli.tick_ms.unwrap_or(config.playback.tick_interval_ms));

    match cli.command {
        Some(Commands::Plan { age_group, json }) => {
            cmd_plan(&AgeGroup::parse(&age_group)?, json, cli.demo, &config)
        }
        Some(Commands::Start {
            age_group,
            day,
            auto,
        }) => cmd_start(
            &AgeGroup::parse(&age_group)?,
            day.as_deref(),
            auto,
            cli.demo,
            tick,
            &config,
        ),
        None => cmd_interactive(cli.demo, tick, &config),
    }
}

fn make_provider(demo: bool, config: &Config) -> Result<Box<dyn PlanProvider>> {
    if demo {
        return Ok(Box::new(DemoPlanProvider));
    }

    let provider = GeminiPlanProvider::from_env()?
        .with_model(config.provider.model.clone())
        .with_timeout(Duration::from_secs(config.provider.timeout_seconds));
    Ok(Box::new(provider))
}

fn cmd_plan(age_group: &AgeGroup, json: bool, demo: bool, config: &Config) -> Result<()> {
    let provider = make_provider(demo, config)?;

    eprintln!("Generating your personalized plan...");
    let plan = provider.weekly_plan(*age_group)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    display_plan(age_group, &plan);
    Ok(())
}

fn cmd_start(
    age_group: &AgeGroup,
    day: Option<&str>,
    auto: bool,
    demo: bool,
    tick: Duration,
    config: &Config,
) -> Result<()> {
    let provider = make_provider(demo, config)?;

    eprintln!("Generating your personalized plan...");
    let plan = provider.weekly_plan(*age_group)?;

    let day_plan = resolve_day(&plan, day)?;
    let mut profile = UserProfile::new(config.user.name.clone(), *age_group);
    run_workout(day_plan, tick, auto, &mut profile)
}

fn cmd_interactive(demo: bool, tick: Duration, config: &Config) -> Result<()> {
    println!("Welcome to ZenithFit - your personal AI fitness coach.");

    loop {
        let Some(age_group) = prompt_age_group()? else {
            return Ok(());
        };

        let mut profile = UserProfile::new(config.user.name.clone(), age_group);
        let provider = make_provider(demo, config)?;

        println!("\nGenerating your personalized plan...");
        let plan = match provider.weekly_plan(age_group) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!("Plan request failed: {}", e);
                println!("\n✗ Failed to generate workout plan. Please try again.");
                // Retry discards the profile and returns to age selection
                if prompt_retry()? {
                    continue;
                }
                return Ok(());
            }
        };

        match dashboard_loop(&plan, &mut profile, tick)? {
            ShellAction::ChangeAgeGroup => continue,
            ShellAction::Quit => return Ok(()),
        }
    }
}

/// What the dashboard loop ended with
enum ShellAction {
    ChangeAgeGroup,
    Quit,
}

fn dashboard_loop(
    plan: &WeeklyPlan,
    profile: &mut UserProfile,
    tick: Duration,
) -> Result<ShellAction> {
    loop {
        display_dashboard(&profile.name, plan);
        println!("─────────────────────────────────────────");
        println!("Pick a day (1-7) to start its workout");
        println!("  't' + Enter for today's workout");
        println!("  'p' + Enter for your profile");
        println!("  'c' + Enter to change age group");
        println!("  'q' + Enter to quit");

        let input = prompt_line()?;
        match input.as_str() {
            "q" => return Ok(ShellAction::Quit),
            "c" => return Ok(ShellAction::ChangeAgeGroup),
            "p" => display_profile(profile),
            "t" => run_workout(plan.today(), tick, false, profile)?,
            other => {
                if let Ok(n) = other.parse::<usize>() {
                    if (1..=plan.days.len()).contains(&n) {
                        run_workout(&plan.days[n - 1], tick, false, profile)?;
                        continue;
                    }
                }
                println!("Unrecognized choice: {}", other);
            }
        }
    }
}

// ============================================================================
// Guided workout page
// ============================================================================

enum WorkoutAction {
    StartPause,
    Next,
    Prev,
    Reset,
    Jump(usize),
    Quit,
}

fn run_workout(
    day: &DayPlan,
    tick: Duration,
    auto: bool,
    profile: &mut UserProfile,
) -> Result<()> {
    let mut session = PlaybackSession::new(&day.exercises)?;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", day.title);
    println!("╰─────────────────────────────────────────╯");
    println!("  Day: {}", day.day);

    loop {
        display_workout_state(day, &session);

        let action = if auto {
            WorkoutAction::StartPause
        } else {
            prompt_workout_action()?
        };

        match action {
            WorkoutAction::StartPause => {
                session.toggle_running();
                match run_countdown(&mut session, tick) {
                    TickOutcome::Advanced { index } => {
                        println!(
                            "\n✓ Done! Up next: {}",
                            day.exercises[index].name
                        );
                    }
                    TickOutcome::Completed => {
                        profile.record_workout();
                        display_workout_summary(day, profile);
                        return Ok(());
                    }
                    TickOutcome::Idle | TickOutcome::Ticked => {}
                }
            }
            WorkoutAction::Next => session.advance(),
            WorkoutAction::Prev => session.retreat(),
            WorkoutAction::Reset => session.reset(),
            WorkoutAction::Jump(n) => {
                if (1..=session.exercise_count()).contains(&n) {
                    session.select_exercise(n - 1)?;
                } else {
                    println!("No exercise {} in this workout", n);
                }
            }
            WorkoutAction::Quit => return Ok(()),
        }
    }
}

/// Drive the session at the scheduler interval until the countdown expires.
///
/// One ticking loop runs per countdown; it ends on every transition, so each
/// exercise gets a fresh registration and stale intervals can never stack up
/// and outrun real time.
fn run_countdown(session: &mut PlaybackSession, tick: Duration) -> TickOutcome {
    loop {
        render_countdown(session);

        if !session.is_running() && session.remaining_seconds() > 0 {
            // Paused with time left; hand control back to the prompt
            println!();
            return TickOutcome::Idle;
        }

        thread::sleep(tick);

        match session.tick() {
            TickOutcome::Ticked => {}
            outcome => {
                println!();
                return outcome;
            }
        }
    }
}

fn render_countdown(session: &PlaybackSession) {
    const WIDTH: usize = 24;
    let filled = (session.progress() * WIDTH as f32).round() as usize;

    print!(
        "\r  [{}{}] {}  ",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        playback::format_remaining(session.remaining_seconds())
    );
    let _ = io::stdout().flush();
}

// ============================================================================
// Display
// ============================================================================

fn display_plan(age_group: &AgeGroup, plan: &WeeklyPlan) {
    println!("\nWeekly plan for {}", age_group.label());

    for (i, day) in plan.days.iter().enumerate() {
        println!("\n{}. {} - {} (~{} min)", i + 1, day.day, day.title, day.planned_minutes());
        for exercise in &day.exercises {
            println!("   • {} ({})", exercise.name, exercise.measure());
        }
    }
}

fn display_dashboard(name: &str, plan: &WeeklyPlan) {
    let today = plan.today();

    println!("\nHello, {}", name);
    println!(
        "It's {} - ready to crush your goals today?",
        chrono::Local::now().format("%A, %B %d")
    );

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WORKOUT OF THE DAY");
    println!("╰─────────────────────────────────────────╯");
    println!("  {} ({})", today.title, today.day);
    let names: Vec<&str> = today.exercises.iter().map(|e| e.name.as_str()).collect();
    println!("  {}", names.join(" • "));

    println!("\nYour weekly plan:");
    for (i, day) in plan.days.iter().enumerate() {
        println!(
            "  {}. {:<9} {:<24} ~{} min",
            i + 1,
            day.day,
            day.title,
            day.planned_minutes()
        );
    }

    println!("\nWeekly minutes:");
    for point in plan.progress() {
        println!("  {:<9} {}", point.day, "▇".repeat(point.minutes as usize));
    }
}

fn display_profile(profile: &UserProfile) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  MY PROFILE");
    println!("╰─────────────────────────────────────────╯");
    println!("  {}", profile.name);
    println!("  {}", profile.age_group.label());
    println!();
    println!("  Workouts completed: {}", profile.workouts_completed);
    println!("  Current streak:     {} days", profile.streak);
    println!("  Fitness level:      {}", profile.fitness_level());
    println!("  Avatar:             {}", profile.avatar_url);
}

fn display_workout_state(day: &DayPlan, session: &PlaybackSession) {
    let current = session.current_exercise();

    println!(
        "\nExercise {}/{}: {}",
        session.current_index() + 1,
        session.exercise_count(),
        current.name
    );
    println!("  {}", current.description);
    println!("  Target: {}", current.measure());
    if current.duration_seconds == 0 {
        println!(
            "  Paced at {} (rep-based)",
            playback::format_remaining(pacing_window(current))
        );
    }
    println!("  Video: {}", current.video_url());

    println!();
    for (i, exercise) in day.exercises.iter().enumerate() {
        let marker = if i == session.current_index() { "→" } else { " " };
        println!(
            "  {} {}. {} ({})",
            marker,
            i + 1,
            exercise.name,
            exercise.measure()
        );
    }
}

fn display_workout_summary(day: &DayPlan, profile: &UserProfile) {
    println!("\n✓ Workout complete!");
    println!("  {} - {} exercises done", day.title, day.exercises.len());
    println!(
        "  Totals: {} workouts completed, {} day streak",
        profile.workouts_completed, profile.streak
    );
}

// ============================================================================
// Prompts
// ============================================================================

fn prompt_line() -> Result<String> {
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        // EOF on stdin reads as quit
        return Ok("q".into());
    }
    Ok(input.trim().to_lowercase())
}

fn prompt_age_group() -> Result<Option<AgeGroup>> {
    println!("\nSelect your age group:");
    for (i, group) in AgeGroup::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, group.label());
    }
    println!("  'q' + Enter to quit");

    loop {
        let input = prompt_line()?;
        if input == "q" {
            return Ok(None);
        }

        if let Ok(n) = input.parse::<usize>() {
            if (1..=AgeGroup::ALL.len()).contains(&n) {
                return Ok(Some(AgeGroup::ALL[n - 1]));
            }
        }
        if let Ok(group) = AgeGroup::parse(&input) {
            return Ok(Some(group));
        }

        println!("Pick 1-{} or an age group name", AgeGroup::ALL.len());
    }
}

fn prompt_retry() -> Result<bool> {
    println!("Press Enter to try again, 'q' + Enter to quit");
    Ok(prompt_line()? != "q")
}

fn prompt_workout_action() -> Result<WorkoutAction> {
    println!("─────────────────────────────────────────");
    println!("Press Enter to start the countdown");
    println!("  'n' next  'p' previous  'r' restart");
    println!("  a number to jump  'q' back");

    let input = prompt_line()?;
    let action = match input.as_str() {
        "q" => WorkoutAction::Quit,
        "n" => WorkoutAction::Next,
        "p" => WorkoutAction::Prev,
        "r" => WorkoutAction::Reset,
        other => match other.parse::<usize>() {
            Ok(n) => WorkoutAction::Jump(n),
            Err(_) => WorkoutAction::StartPause,
        },
    };

    Ok(action)
}

fn resolve_day<'a>(plan: &'a WeeklyPlan, day: Option<&str>) -> Result<&'a DayPlan> {
    let Some(day) = day else {
        return Ok(plan.today());
    };

    if let Ok(n) = day.parse::<usize>() {
        if (1..=plan.days.len()).contains(&n) {
            return Ok(&plan.days[n - 1]);
        }
        return Err(Error::Other(format!(
            "Day {} out of range (1-{})",
            n,
            plan.days.len()
        )));
    }

    let needle = day.to_lowercase();
    plan.days
        .iter()
        .find(|d| d.day.to_lowercase().starts_with(&needle))
        .ok_or_else(|| Error::Other(format!("No day matching '{}' in the plan", day)))
}
