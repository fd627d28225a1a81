use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use photo_scout::app::{App, Settings};
use photo_scout::ban::{BanAttribute, BanToggle};
use photo_scout::detail::PhotoDetail;
use photo_scout::fetch::{FetchError, UnsplashClient};
use photo_scout::filter::{DateRange, FilterCriteria, FilterField, Orientation, Range};
use photo_scout::report::{self, ReportView};
use photo_scout::session::Session;
use photo_scout::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-scout")]
#[command(version)]
#[command(about = "Fetch, filter, and summarize random photos from Unsplash")]
#[command(long_about = "\
Fetch, filter, and summarize random photos from Unsplash

Every command loads the session from the state directory, performs one
action, and saves it again. The session holds the current collection, the
discovery history, filters, bans, and rate-limit state.

The API key is read from config.toml ([api] access_key) or from the
environment variable named by [api] access_key_env (UNSPLASH_ACCESS_KEY).

Run 'photo-scout gen-config' to generate a documented config.toml.
Set RUST_LOG=debug for request logging.")]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Directory for the session file
    #[arg(long, default_value = ".photo-scout", global = true)]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace the collection with a fresh batch of random photos
    Fetch,
    /// Draw one random photo that is not banned
    Discover,
    /// Show the collection with the stored filters applied
    List,
    /// Set, clear, or show filters
    #[command(subcommand)]
    Filter(FilterCommand),
    /// Toggle a ban on a description fragment, photographer, or location
    Ban {
        attribute: BanArg,
        value: String,
    },
    /// List banned items
    Bans,
    /// Collection statistics
    Stats,
    /// Show insights for a photo (defaults to the current selection)
    Show { id: Option<String> },
    /// Photos found by 'discover'
    History,
    /// Cooldown countdown and request budget
    Status,
    /// Write a static HTML report of the filtered collection
    Report { path: PathBuf },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum FilterCommand {
    /// Set one or more filters; unspecified filters are left alone
    Set(FilterArgs),
    /// Reset one filter to its default
    Clear { field: FieldArg },
    /// Filter for photos similar to one (defaults to the current selection)
    Suggest { id: Option<String> },
    /// Show the active filters
    Show,
}

#[derive(Args)]
struct FilterArgs {
    /// Words that must all appear in description, photographer, location, or bio
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// Substring of the photographer's username
    #[arg(long)]
    photographer: Option<String>,
    #[arg(long)]
    min_likes: Option<u64>,
    #[arg(long)]
    max_likes: Option<u64>,
    #[arg(long)]
    orientation: Option<OrientationArg>,
    /// Stored but not applied
    #[arg(long)]
    date_range: Option<DateRangeArg>,
    /// Category or tag; repeat to add several
    #[arg(long = "category")]
    categories: Vec<String>,
    #[arg(long)]
    min_width: Option<u64>,
    #[arg(long)]
    max_width: Option<u64>,
    #[arg(long)]
    min_height: Option<u64>,
    #[arg(long)]
    max_height: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BanArg {
    Description,
    Photographer,
    Location,
}

impl From<BanArg> for BanAttribute {
    fn from(arg: BanArg) -> Self {
        match arg {
            BanArg::Description => Self::Description,
            BanArg::Photographer => Self::Photographer,
            BanArg::Location => Self::Location,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Search,
    Location,
    Likes,
    Photographer,
    Orientation,
    DateRange,
    Categories,
    Dimensions,
}

impl From<FieldArg> for FilterField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Search => Self::Search,
            FieldArg::Location => Self::Location,
            FieldArg::Likes => Self::Likes,
            FieldArg::Photographer => Self::Photographer,
            FieldArg::Orientation => Self::Orientation,
            FieldArg::DateRange => Self::DateRange,
            FieldArg::Categories => Self::Categories,
            FieldArg::Dimensions => Self::Dimensions,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    All,
    Landscape,
    Portrait,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::All => Self::All,
            OrientationArg::Landscape => Self::Landscape,
            OrientationArg::Portrait => Self::Portrait,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DateRangeArg {
    All,
    Today,
    Week,
    Month,
    Year,
}

impl From<DateRangeArg> for DateRange {
    fn from(arg: DateRangeArg) -> Self {
        match arg {
            DateRangeArg::All => Self::All,
            DateRangeArg::Today => Self::Today,
            DateRangeArg::Week => Self::Week,
            DateRangeArg::Month => Self::Month,
            DateRangeArg::Year => Self::Year,
        }
    }
}

impl FilterArgs {
    fn apply_to(self, criteria: &mut FilterCriteria) {
        if let Some(search) = self.search {
            criteria.search_query = search;
        }
        if let Some(location) = self.location {
            criteria.location = location;
        }
        if let Some(photographer) = self.photographer {
            criteria.photographer = photographer;
        }
        if self.min_likes.is_some() || self.max_likes.is_some() {
            criteria.likes = Range::new(self.min_likes.unwrap_or(0), self.max_likes);
        }
        if let Some(orientation) = self.orientation {
            criteria.orientation = orientation.into();
        }
        if let Some(date_range) = self.date_range {
            criteria.date_range = date_range.into();
        }
        criteria.categories.extend(self.categories);
        if self.min_width.is_some() || self.max_width.is_some() {
            criteria.dimensions.width = Range::new(self.min_width.unwrap_or(0), self.max_width);
        }
        if self.min_height.is_some() || self.max_height.is_some() {
            criteria.dimensions.height = Range::new(self.min_height.unwrap_or(0), self.max_height);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config_dir)?;
    let session = Session::load(&cli.state_dir);
    let client = UnsplashClient::new(&config.api, &config.fetch);
    let mut app = App::new(client, Settings::from(&config), session);

    let now = Utc::now();
    let result = run(&mut app, cli.command, now);

    // Save even on failure: a rate-limit answer sets a cooldown that must persist.
    app.into_session().save(&cli.state_dir)?;

    if let Err(e) = result {
        if let Some(fetch_err) = e.downcast_ref::<FetchError>() {
            eprintln!("{}", fetch_err.user_message(now));
            std::process::exit(1);
        }
        return Err(e);
    }
    Ok(())
}

fn run(
    app: &mut App<UnsplashClient>,
    command: Command,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Fetch => {
            let loaded = app.refresh(now)?;
            let visible = app.visible();
            output::print_lines(&output::format_photo_list(&visible, loaded, app.bans()));
        }
        Command::Discover => {
            let outcome = app.discover(now)?;
            output::print_lines(&output::format_draw(&outcome, app.bans()));
        }
        Command::List => {
            let visible = app.visible();
            output::print_lines(&output::format_photo_list(
                &visible,
                app.photos().len(),
                app.bans(),
            ));
        }
        Command::Filter(FilterCommand::Set(args)) => {
            args.apply_to(app.criteria_mut());
            output::print_lines(&output::format_criteria(app.criteria()));
            println!("{} of {} photos match", app.visible().len(), app.photos().len());
        }
        Command::Filter(FilterCommand::Clear { field }) => {
            app.clear_filter(field.into());
            output::print_lines(&output::format_criteria(app.criteria()));
        }
        Command::Filter(FilterCommand::Suggest { id }) => {
            let applied = app.apply_suggestions(id.as_deref()).ok_or_else(|| match &id {
                Some(id) => format!("no photo with id '{id}' in the collection or history"),
                None => "no photo selected; pass an id or run 'photo-scout discover'".to_string(),
            })?;
            output::print_lines(&output::format_suggestions(&applied));
            output::print_lines(&output::format_criteria(app.criteria()));
            println!("{} of {} photos match", app.visible().len(), app.photos().len());
        }
        Command::Filter(FilterCommand::Show) => {
            output::print_lines(&output::format_criteria(app.criteria()));
        }
        Command::Ban { attribute, value } => {
            let attribute = BanAttribute::from(attribute);
            match app.toggle_ban(&value, attribute) {
                BanToggle::Added => println!("Banned {attribute} '{value}'"),
                BanToggle::Removed => println!("Unbanned {attribute} '{value}'"),
                BanToggle::Ignored => println!("Nothing to ban: empty value"),
            }
        }
        Command::Bans => output::print_lines(&output::format_bans(app.bans())),
        Command::Stats => output::print_lines(&output::format_stats(app.stats())),
        Command::Show { id } => {
            let photo = match id {
                Some(id) => app
                    .select(&id)
                    .cloned()
                    .ok_or_else(|| format!("no photo with id '{id}' in the collection or history"))?,
                None => app
                    .selected()
                    .cloned()
                    .ok_or("no photo selected; pass an id or run 'photo-scout discover'")?,
            };
            let detail = PhotoDetail::from_photo(&photo);
            output::print_lines(&output::format_detail(&photo, &detail, app.bans()));
        }
        Command::History => output::print_lines(&output::format_history(app.history())),
        Command::Status => {
            output::print_lines(&output::format_status(app.throttle(), app.settings(), now));
        }
        Command::Report { path } => {
            let visible = app.visible();
            report::write(
                &path,
                &ReportView {
                    stats: app.stats(),
                    bans: app.bans(),
                    visible: &visible,
                    generated_at: now,
                },
            )?;
            println!("Report written to {}", path.display());
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }
    Ok(())
}

/// Log to stderr; `warn` unless `RUST_LOG` says otherwise.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
