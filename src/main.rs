use std::path::PathBuf;

use blueprint::{
    BlueprintError, Channel, ContactConfig, FacetSelection, OutboundMessage, Size, SpaceType,
    Track,
    catalog::{
        self, BackupGoal, BudgetFocus, BusinessType, Cabling, CoverageNeed, MainGoal,
        PackageInquiry, TrackOptions,
    },
    message,
    navigation::NAV_ITEMS,
    resolve,
    survey::{PreferredTime, SurveyRequest},
    writer,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use itertools::Itertools;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Read contact details from this file instead of the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ClapArgs, Debug)]
struct Facets {
    #[arg(short, long)]
    track: Track,

    #[arg(short, long, default_value = "home")]
    space: SpaceType,

    #[arg(short = 'z', long, default_value = "small")]
    size: Size,

    /// Defaults to the track's first priority
    #[arg(short, long)]
    priority: Option<String>,

    #[arg(short, long)]
    location: Option<String>,
}

impl Facets {
    fn selection(&self) -> Result<FacetSelection, BlueprintError> {
        let selection = FacetSelection::for_track(self.track)
            .with_space(self.space)
            .with_size(self.size);
        match &self.priority {
            Some(name) => {
                selection.with_priority(blueprint::Priority::parse_for(self.track, name)?)
            }
            None => Ok(selection),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the recommendation, message and hand-off links for a selection
    Resolve {
        #[command(flatten)]
        facets: Facets,
    },
    /// Print a single hand-off link for a selection
    Link {
        #[arg(short, long, value_enum, default_value_t = Channel::WhatsApp)]
        channel: Channel,

        #[command(flatten)]
        facets: Facets,
    },
    /// List the packages offered for a track
    Packages {
        #[arg(short, long)]
        track: Track,
    },
    /// Build a package inquiry
    Inquiry {
        #[arg(short, long)]
        track: Track,
        #[arg(long)]
        package: String,
        #[arg(short, long)]
        space: Option<SpaceType>,
        #[arg(short = 'z', long)]
        size: Option<Size>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long)]
        budget: Option<BudgetFocus>,
        #[arg(long)]
        cabling: Option<Cabling>,
        #[arg(long)]
        backup: Option<BackupGoal>,
        #[arg(long)]
        coverage: Option<CoverageNeed>,
        #[arg(long)]
        business: Option<BusinessType>,
        #[arg(long)]
        goal: Option<MainGoal>,
        #[arg(short, long, value_enum, default_value_t = Channel::WhatsApp)]
        channel: Channel,
    },
    /// Build a site survey request
    Survey {
        #[arg(short, long)]
        space: Option<SpaceType>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long)]
        time: Option<PreferredTime>,
        #[arg(short, long)]
        note: Option<String>,
        #[arg(short, long, value_enum, default_value_t = Channel::WhatsApp)]
        channel: Channel,
    },
    /// Write every cell of the decision tables to a JSON lines file
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Compare a JSON lines snapshot with the current decision tables
    Verify {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Open-ended inquiry from the digital solutions section
    Digital {
        #[arg(short, long, value_enum, default_value_t = Channel::WhatsApp)]
        channel: Channel,
    },
    /// Show the contact cards with their links
    Contact,
    /// List the header navigation items
    Nav,
    /// Percent-decode a message taken from a link
    Decode { text: String },
    /// Show or write the contact config
    Config {
        /// Write the default config to the user config directory
        #[arg(long)]
        init: bool,
    },
}

fn load_contact(path: Option<&PathBuf>) -> Result<ContactConfig, BlueprintError> {
    match path {
        Some(path) => Ok(ContactConfig::load(path)?.unwrap_or_default()),
        None => Ok(ContactConfig::from_local_file().unwrap_or_default()),
    }
}

fn print_handoff(message: &OutboundMessage, contact: &ContactConfig) {
    println!("{}", message.body);
    println!();
    println!("WhatsApp: {}", message.whatsapp_link(contact));
    println!("Email:    {}", message.mailto_link(contact));
}

fn resolve_command(facets: &Facets, contact: &ContactConfig) -> Result<(), BlueprintError> {
    let selection = facets.selection()?;
    let result = resolve(&selection);
    info!(
        "Resolved {} / {} / {}",
        selection.track(),
        selection.size(),
        selection.priority()
    );

    println!("{} Blueprint", selection.track());
    for attribute in result.attributes() {
        println!("  {attribute}");
    }
    println!();
    let message = OutboundMessage::blueprint(&selection, &result, facets.location.as_deref());
    print_handoff(&message, contact);
    Ok(())
}

fn link_command(
    channel: Channel,
    facets: &Facets,
    contact: &ContactConfig,
) -> Result<(), BlueprintError> {
    let selection = facets.selection()?;
    let result = resolve(&selection);
    let message = OutboundMessage::blueprint(&selection, &result, facets.location.as_deref());
    println!("{}", message.link(channel, contact));
    Ok(())
}

fn packages_command(track: Track) {
    for package in catalog::packages(track) {
        let marker = if package.recommended { " (recommended)" } else { "" };
        println!("{} [{}]{} - {}", package.name, package.id, marker, package.short_desc);
        println!("  \"{}\"", package.customer_feeling);
        println!("  Best for: {}", package.best_for);
        for item in package.includes {
            println!("  ✓ {item}");
        }
        println!("  {}", package.technical_details);
        println!();
    }
}

#[allow(clippy::too_many_arguments)]
fn inquiry_command(
    track: Track,
    package: &str,
    space: Option<SpaceType>,
    size: Option<Size>,
    location: Option<String>,
    options: TrackOptions,
    channel: Channel,
    contact: &ContactConfig,
) -> Result<(), BlueprintError> {
    let inquiry = PackageInquiry {
        space,
        size,
        location,
        ..PackageInquiry::new(track)
    }
    .with_package(package)?
    .with_options(options)?;

    if !inquiry.is_complete() {
        let missing = match track {
            Track::Digital => "--business and --goal",
            _ => "--space and --size",
        };
        return Err(BlueprintError::InvalidSelection {
            field: "inquiry".to_string(),
            reason: format!("incomplete, {missing} are required for the {} track", track.key()),
        });
    }

    match inquiry.outbound() {
        Some(message) => {
            println!("{}", message.body);
            println!();
            println!("{}", message.link(channel, contact));
        }
        None => error!("No package selected"),
    }
    Ok(())
}

fn track_options(
    track: Track,
    budget: Option<BudgetFocus>,
    cabling: Option<Cabling>,
    backup: Option<BackupGoal>,
    coverage: Option<CoverageNeed>,
    business: Option<BusinessType>,
    goal: Option<MainGoal>,
) -> TrackOptions {
    match track {
        Track::Security => TrackOptions::Security { budget, cabling },
        Track::Networking => TrackOptions::Networking { coverage },
        Track::Solar => TrackOptions::Solar { backup },
        Track::Digital => TrackOptions::Digital { business, goal },
    }
}

fn contact_command(contact: &ContactConfig) {
    println!("Name:     {}", contact.business_name);
    println!("Email:    {} <mailto:{}>", contact.email, contact.email);
    println!("Phone:    {} <{}>", contact.phone_display, message::tel_link(&contact.phone));
    println!("Address:  {} <{}>", contact.address, message::maps_link(&contact.address));
    println!("Serving:  {}", contact.service_areas.iter().join(", "));
}

fn verify_command(input: &PathBuf) -> Result<bool, BlueprintError> {
    let differences = writer::verify_snapshot(input)?;
    if differences.is_empty() {
        println!("Snapshot matches the current tables");
        return Ok(true);
    }
    for difference in &differences {
        println!("{difference}");
    }
    println!("{} cells differ", differences.len());
    Ok(false)
}

fn config_command(init: bool, contact: &ContactConfig) -> Result<(), BlueprintError> {
    if init {
        let path = ContactConfig::default().save()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }
    let json = serde_json::to_string_pretty(contact)
        .map_err(|e| BlueprintError::ConfigSerializeError { source: e })?;
    println!("{json}");
    Ok(())
}

fn run(cli: Args) -> Result<bool, BlueprintError> {
    let contact = load_contact(cli.config.as_ref())?;
    match cli.command {
        Commands::Resolve { facets } => resolve_command(&facets, &contact)?,
        Commands::Link { channel, facets } => link_command(channel, &facets, &contact)?,
        Commands::Packages { track } => packages_command(track),
        Commands::Inquiry {
            track,
            package,
            space,
            size,
            location,
            budget,
            cabling,
            backup,
            coverage,
            business,
            goal,
            channel,
        } => {
            let options = track_options(track, budget, cabling, backup, coverage, business, goal);
            inquiry_command(track, &package, space, size, location, options, channel, &contact)?
        }
        Commands::Survey {
            space,
            location,
            time,
            note,
            channel,
        } => {
            let request = SurveyRequest {
                space,
                location,
                preferred_time: time,
                note,
            };
            let message = request.outbound(&contact.business_name);
            println!("{}", message.body);
            println!();
            println!("{}", message.link(channel, &contact));
        }
        Commands::Export { output } => {
            let count = writer::write_snapshot(&output)?;
            println!("Wrote {count} cells to {}", output.display());
        }
        Commands::Verify { input } => return verify_command(&input),
        Commands::Digital { channel } => {
            let message = OutboundMessage::digital_solutions(&contact);
            println!("{}", message.body);
            println!();
            println!("{}", message.link(channel, &contact));
        }
        Commands::Contact => contact_command(&contact),
        Commands::Nav => {
            let items = NAV_ITEMS
                .iter()
                .map(|item| format!("{:<10} {}", item.label, item.id.href()))
                .join("\n");
            println!("{items}");
        }
        Commands::Decode { text } => println!("{}", message::decode_component(&text)),
        Commands::Config { init } => config_command(init, &contact)?,
    }
    Ok(true)
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
