use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::LessonPlan;
use crate::domain::models::LessonPlanInput;
use crate::domain::models::Mailer;
use crate::domain::models::PaymentOutcome;
use crate::domain::models::PaymentProcessor;
use crate::domain::models::PaymentRequest;
use crate::domain::models::PlanGenerator;
use crate::domain::services::AccountStore;
use crate::domain::services::PlanStore;
use crate::domain::services::SessionStore;
use crate::infrastructure::backends::MockMailer;
use crate::infrastructure::backends::MockPaymentGateway;
use crate::infrastructure::backends::MockPlanGenerator;

const PRICE_SINGLE: u64 = 500;
const PRICE_MONTHLY: u64 = 3000;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("LESSONCRAFT_CONFIG_FILE")
        .global(true)
        .num_args(1)
        .help(format!(
            "Path to the configuration file. [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ));
}

fn arg_data_dir() -> Arg {
    return Arg::new(ConfigKey::DataDir.to_string())
        .long(ConfigKey::DataDir.to_string())
        .env("LESSONCRAFT_DATA_DIR")
        .global(true)
        .num_args(1)
        .help(format!(
            "Directory holding the account and plan entries. [default: {}]",
            Config::default(ConfigKey::DataDir)
        ));
}

fn arg_auth_delay_ms() -> Arg {
    return Arg::new(ConfigKey::AuthDelayMs.to_string())
        .long(ConfigKey::AuthDelayMs.to_string())
        .env("LESSONCRAFT_AUTH_DELAY_MS")
        .global(true)
        .num_args(1)
        .help(format!(
            "Simulated delay in milliseconds for login and signup. [default: {}]",
            Config::default(ConfigKey::AuthDelayMs)
        ));
}

fn arg_generate_delay_ms() -> Arg {
    return Arg::new(ConfigKey::GenerateDelayMs.to_string())
        .long(ConfigKey::GenerateDelayMs.to_string())
        .env("LESSONCRAFT_GENERATE_DELAY_MS")
        .global(true)
        .num_args(1)
        .help(format!(
            "Simulated delay in milliseconds for plan generation. [default: {}]",
            Config::default(ConfigKey::GenerateDelayMs)
        ));
}

fn arg_payment_delay_ms() -> Arg {
    return Arg::new(ConfigKey::PaymentDelayMs.to_string())
        .long(ConfigKey::PaymentDelayMs.to_string())
        .env("LESSONCRAFT_PAYMENT_DELAY_MS")
        .global(true)
        .num_args(1)
        .help(format!(
            "Simulated delay in milliseconds for payment attempts. [default: {}]",
            Config::default(ConfigKey::PaymentDelayMs)
        ));
}

fn arg_email_delay_ms() -> Arg {
    return Arg::new(ConfigKey::EmailDelayMs.to_string())
        .long(ConfigKey::EmailDelayMs.to_string())
        .env("LESSONCRAFT_EMAIL_DELAY_MS")
        .global(true)
        .num_args(1)
        .help(format!(
            "Simulated delay in milliseconds for mail delivery. [default: {}]",
            Config::default(ConfigKey::EmailDelayMs)
        ));
}

fn arg_payment_success_rate() -> Arg {
    return Arg::new(ConfigKey::PaymentSuccessRate.to_string())
        .long(ConfigKey::PaymentSuccessRate.to_string())
        .env("LESSONCRAFT_PAYMENT_SUCCESS_RATE")
        .global(true)
        .num_args(1)
        .help(format!(
            "Probability that a mock payment attempt is approved. [default: {}]",
            Config::default(ConfigKey::PaymentSuccessRate)
        ));
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_signup() -> Command {
    return Command::new("signup")
        .about("Create a teacher account and sign in.")
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Email address used as the account lookup key.")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .help("Password, six characters minimum.")
                .required(true),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Display name, used verbatim.")
                .required(true),
        );
}

fn subcommand_login() -> Command {
    return Command::new("login")
        .about("Sign in to an existing account.")
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Email address used as the account lookup key.")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .help("Password, six characters minimum.")
                .required(true),
        );
}

fn subcommand_generate() -> Command {
    return Command::new("generate")
        .about("Generate a templated lesson plan and save it to the plan library.")
        .arg(
            Arg::new("subject")
                .short('s')
                .long("subject")
                .help("Subject the lesson belongs to, e.g. Math.")
                .required(true),
        )
        .arg(
            Arg::new("grade-level")
                .short('g')
                .long("grade-level")
                .help("Class level the plan targets, e.g. Primary 3.")
                .required(true),
        )
        .arg(
            Arg::new("topic")
                .short('t')
                .long("topic")
                .help("Topic the template is expanded around.")
                .required(true),
        )
        .arg(
            Arg::new("duration")
                .short('d')
                .long("duration")
                .help("Lesson duration in minutes.")
                .value_parser(value_parser!(u32))
                .default_value("40"),
        )
        .arg(
            Arg::new("objective")
                .short('o')
                .long("objective")
                .help("Optional learning objective carried on the plan input."),
        )
        .arg(
            Arg::new("email-to")
                .long("email-to")
                .help("Send the generated plan to this address through the mock mailer."),
        );
}

fn subcommand_upgrade() -> Command {
    return Command::new("upgrade")
        .about("Attempt a premium upgrade purchase through the mock payment gateway.")
        .arg(
            Arg::new("plan")
                .long("plan")
                .help("Pricing plan to purchase.")
                .value_parser(["single", "monthly"])
                .default_value("single"),
        )
        .arg(
            Arg::new("phone")
                .long("phone")
                .help("Phone number passed along with the payment attempt.")
                .required(true),
        );
}

pub fn build() -> Command {
    return Command::new("lessoncraft")
        .about("Terminal companion for teachers to draft templated lesson plans, with a simulated premium upgrade flow.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .arg(arg_config_file())
        .arg(arg_data_dir())
        .arg(arg_auth_delay_ms())
        .arg(arg_generate_delay_ms())
        .arg(arg_payment_delay_ms())
        .arg(arg_email_delay_ms())
        .arg(arg_payment_success_rate())
        .subcommand(subcommand_signup())
        .subcommand(subcommand_login())
        .subcommand(Command::new("logout").about("Sign out and delete the stored session."))
        .subcommand(Command::new("status").about("Show the current session state."))
        .subcommand(subcommand_generate())
        .subcommand(Command::new("plans").about("List saved lesson plans."))
        .subcommand(subcommand_upgrade())
        .subcommand(subcommand_config())
        .subcommand(subcommand_completions());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

/// Every state transition is rendered through the store's pub/sub path, the
/// same way the web views subscribed to it.
fn attach_renderer(store: &mut SessionStore) {
    store.subscribe(|state| {
        if state.is_loading {
            println!("Checking your credentials...");
            return;
        }

        match &state.account {
            Some(account) if account.is_premium => {
                println!(
                    "Signed in as {} <{}> {}",
                    account.name,
                    account.email,
                    "[premium]".yellow()
                );
            }
            Some(account) => {
                println!("Signed in as {} <{}>", account.name, account.email);
            }
            None => println!("Signed out."),
        }
    });
}

fn open_store() -> Result<SessionStore> {
    let mut store = SessionStore::new(AccountStore::default())?;
    attach_renderer(&mut store);
    return Ok(store);
}

fn format_plan(plan: &LessonPlan) -> String {
    return format!(
        "- (ID: {}) {}, {}: {} ({}, {} mins)",
        plan.id,
        plan.created_at,
        plan.input.subject,
        plan.input.topic,
        plan.input.grade_level,
        plan.input.duration_minutes,
    );
}

fn print_section(title: &str, lines: &[String]) {
    println!("\n{}", title.bold());
    for line in lines {
        println!("  - {line}");
    }
}

fn print_plan(plan: &LessonPlan) {
    println!(
        "\n{} — {} ({}, {} mins)",
        plan.input.subject.bold(),
        plan.input.topic,
        plan.input.grade_level,
        plan.input.duration_minutes
    );
    print_section("Objectives", &plan.content.objectives);
    println!("\n{}\n  {}", "Warm-up".bold(), plan.content.warm_up);
    print_section("Core content", &plan.content.core_content);
    print_section("Student activities", &plan.content.student_activities);
    print_section("Assessment questions", &plan.content.assessment_questions);
    print_section("Homework tasks", &plan.content.homework_tasks);
}

async fn run_signup(matches: &ArgMatches) -> Result<()> {
    let mut store = open_store()?;
    let email = matches.get_one::<String>("email").unwrap();
    let password = matches.get_one::<String>("password").unwrap();
    let name = matches.get_one::<String>("name").unwrap();

    let outcome = store.signup(email, password, name).await?;
    if !outcome.is_granted() {
        bail!("Please fill all fields correctly");
    }

    return Ok(());
}

async fn run_login(matches: &ArgMatches) -> Result<()> {
    let mut store = open_store()?;
    let email = matches.get_one::<String>("email").unwrap();
    let password = matches.get_one::<String>("password").unwrap();

    let outcome = store.login(email, password).await?;
    if !outcome.is_granted() {
        bail!("Invalid credentials");
    }

    return Ok(());
}

fn run_status() -> Result<()> {
    let store = SessionStore::new(AccountStore::default())?;
    let state = store.state();

    match state.account {
        Some(account) => {
            let badge = if account.is_premium { " [premium]" } else { "" };
            println!("Signed in as {} <{}>{badge}", account.name, account.email);
            println!("Member since {}", account.created_at);
        }
        None => println!("Signed out."),
    }

    return Ok(());
}

async fn run_generate(matches: &ArgMatches) -> Result<()> {
    let store = SessionStore::new(AccountStore::default())?;
    let state = store.state();
    let Some(account) = state.account else {
        bail!("You need to sign in before generating lesson plans");
    };

    let input = LessonPlanInput {
        subject: matches.get_one::<String>("subject").unwrap().to_string(),
        grade_level: matches
            .get_one::<String>("grade-level")
            .unwrap()
            .to_string(),
        topic: matches.get_one::<String>("topic").unwrap().to_string(),
        duration_minutes: *matches.get_one::<u32>("duration").unwrap(),
        learning_objective: matches
            .get_one::<String>("objective")
            .map(|objective| return objective.to_string()),
    };

    println!("Drafting your lesson plan...");
    let generator = MockPlanGenerator::default();
    let plan = generator.generate(input, &account.id).await?;

    PlanStore::default().append(&plan)?;
    print_plan(&plan);

    if let Some(address) = matches.get_one::<String>("email-to") {
        let mailer = MockMailer::default();
        mailer.send_plan(address, &plan).await?;
        println!("\nLesson plan sent to {address}.");
    }

    return Ok(());
}

fn run_plans() -> Result<()> {
    let plans = PlanStore::default().list()?;
    if plans.is_empty() {
        println!("No lesson plans saved yet. Generate your first one!");
        return Ok(());
    }

    let lines = plans
        .iter()
        .map(|plan| {
            return format_plan(plan);
        })
        .collect::<Vec<String>>();

    println!("{}", lines.join("\n"));
    return Ok(());
}

async fn run_upgrade(matches: &ArgMatches) -> Result<()> {
    let mut store = open_store()?;
    let state = store.state();
    let Some(account) = state.account else {
        bail!("You need to sign in before upgrading to premium");
    };

    if account.is_premium {
        println!("You already have premium access.");
        return Ok(());
    }

    let amount = match matches.get_one::<String>("plan").unwrap().as_str() {
        "monthly" => PRICE_MONTHLY,
        _ => PRICE_SINGLE,
    };
    let phone = matches.get_one::<String>("phone").unwrap();

    let request = PaymentRequest::new(amount, &account.email, Some(phone));
    println!("Processing payment of ₦{amount} ({})...", request.api_ref);

    let gateway = MockPaymentGateway::default();
    match gateway.attempt(&request).await? {
        PaymentOutcome::Approved { transaction_id } => {
            store.upgrade_to_premium()?;
            println!("Payment successful ({transaction_id}). You now have premium access.");
        }
        PaymentOutcome::Declined { reason } => {
            bail!(reason);
        }
    }

    return Ok(());
}

pub async fn parse() -> Result<()> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            let shell = subcmd_matches.get_one::<Shell>("shell").unwrap();
            print_completions(*shell, &mut build());
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
            }
            _ => {
                print!("{}", Config::serialize_default(build()));
            }
        },
        Some(("signup", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            run_signup(subcmd_matches).await?;
        }
        Some(("login", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            run_login(subcmd_matches).await?;
        }
        Some(("logout", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            let mut store = open_store()?;
            store.logout()?;
        }
        Some(("status", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            run_status()?;
        }
        Some(("generate", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            run_generate(subcmd_matches).await?;
        }
        Some(("plans", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            run_plans()?;
        }
        Some(("upgrade", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            run_upgrade(subcmd_matches).await?;
        }
        _ => {
            build().print_help()?;
        }
    }

    return Ok(());
}
