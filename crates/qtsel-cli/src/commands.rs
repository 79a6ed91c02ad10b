use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow};
use qtsel_model::QtVersion;
use tracing::{debug, info_span};

use qtsel_cli::session::Session;
use qtsel_cli::settings::Settings;
use qtsel_cli::source::CacheDirSource;
use qtsel_output::OutputFormat;
use qtsel_state::ActionVersion;

use crate::cli::{
    ActionVersionArg, ArchivesArgs, BuildArgs, Cli, PlatformArgs, RenderArgs, RenderFormatArg,
    VariantsArgs, VersionArgs,
};
use crate::summary::{archives_table, modules_table, names_table, variants_table, versions_table};

/// Settings and cache location shared by every command.
pub struct Context {
    pub settings: Settings,
    pub cache_dir: PathBuf,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let settings = Settings::resolve(cli.config.as_deref()).context("load settings")?;
        let cache_dir = settings
            .cache_dir(cli.cache_dir.as_deref())
            .ok_or_else(|| anyhow!("no metadata cache directory; pass --cache-dir"))?;
        debug!(cache_dir = %cache_dir.display(), "using metadata cache");
        Ok(Self {
            settings,
            cache_dir,
        })
    }

    fn open(&self, platform: &PlatformArgs) -> Result<Session<CacheDirSource>> {
        let host = platform.host();
        let source = CacheDirSource::new(&self.cache_dir);
        Session::open(source, host, platform.target).with_context(|| {
            match &self.settings.metadata.base_url {
                Some(url) => format!("load {host}/{} metadata (mirror {url})", platform.target),
                None => format!("load {host}/{} metadata", platform.target),
            }
        })
    }

    fn open_build(&self, args: &BuildArgs) -> Result<Session<CacheDirSource>> {
        let mut session = self.open(&args.platform)?;
        select_build(&mut session, args.version, args.arch.as_deref())?;
        Ok(session)
    }
}

fn select_build(
    session: &mut Session<CacheDirSource>,
    version: QtVersion,
    arch: Option<&str>,
) -> Result<()> {
    session
        .select_version(version)
        .with_context(|| format!("select Qt {version}"))?;
    match arch {
        Some(arch) => session
            .select_architecture(arch)
            .with_context(|| format!("select architecture {arch}"))?,
        None if session.state().arch().state().has_selection() => {}
        None => {
            let options = session.state().arch().options().join(", ");
            return Err(anyhow!(
                "Qt {version} has several architectures; pick one of: {options}"
            ));
        }
    }
    Ok(())
}

pub fn run_versions(context: &Context, args: &PlatformArgs) -> Result<()> {
    let session = context.open(args)?;
    println!("{}", versions_table(session.state()));
    Ok(())
}

pub fn run_tools(context: &Context, args: &PlatformArgs) -> Result<()> {
    let session = context.open(args)?;
    println!("{}", names_table("Tool", session.state().tool_names().options()));
    Ok(())
}

pub fn run_arches(context: &Context, args: &VersionArgs) -> Result<()> {
    let mut session = context.open(&args.platform)?;
    session
        .select_version(args.version)
        .with_context(|| format!("select Qt {}", args.version))?;
    println!(
        "{}",
        names_table("Architecture", session.state().arch().options())
    );
    Ok(())
}

pub fn run_modules(context: &Context, args: &BuildArgs) -> Result<()> {
    let session = context.open_build(args)?;
    println!("{}", modules_table(session.state().modules().options()));
    Ok(())
}

pub fn run_archives(context: &Context, args: &ArchivesArgs) -> Result<()> {
    let mut session = context.open_build(&args.build)?;
    session
        .set_modules(&args.modules, true)
        .context("select modules")?;
    println!("{}", archives_table(session.state().archives().options()));
    Ok(())
}

pub fn run_variants(context: &Context, args: &VariantsArgs) -> Result<()> {
    let mut session = context.open(&args.platform)?;
    session
        .add_tool(&args.tool)
        .with_context(|| format!("load tool {}", args.tool))?;
    let tool = session
        .state()
        .tool(&args.tool)
        .ok_or_else(|| anyhow!("tool {} was not loaded", args.tool))?;
    println!("{}", variants_table(tool.variants()));
    Ok(())
}

pub fn run_render(context: &Context, args: &RenderArgs) -> Result<()> {
    let _span = info_span!("render").entered();
    let mut session = context.open(&args.platform)?;
    apply_render_args(&mut session, args)?;

    let formats = match args.format {
        RenderFormatArg::Aqt => vec![OutputFormat::Aqt],
        RenderFormatArg::Action => vec![OutputFormat::InstallQtAction],
        RenderFormatArg::Official => vec![OutputFormat::OfficialInstaller],
        RenderFormatArg::All => OutputFormat::ALL.to_vec(),
    };
    let single = formats.len() == 1;
    for format in formats {
        let text = session
            .render(format, &context.settings.render)
            .with_context(|| format!("render {}", format.title()))?;
        if !single {
            println!("# {}", format.title());
        }
        println!("{text}");
        if !single {
            println!();
        }
    }
    Ok(())
}

/// Replay the render flags onto a fresh session.
fn apply_render_args(session: &mut Session<CacheDirSource>, args: &RenderArgs) -> Result<()> {
    session.set_action_version(match args.action_version {
        ActionVersionArg::V2 => ActionVersion::V2,
        ActionVersionArg::V3 => ActionVersion::V3,
        ActionVersionArg::V4 => ActionVersion::V4,
    });

    if let Some(version) = args.version {
        select_build(session, version, args.arch.as_deref())?;
        if args.all_modules {
            session.toggle_modules(true).context("select modules")?;
        } else {
            session
                .set_modules(&args.modules, true)
                .context("select modules")?;
        }
        if args.no_archives {
            session.toggle_archives(false);
        } else if !args.archives.is_empty() {
            session.toggle_archives(false);
            session
                .set_archives(&args.archives, true)
                .context("select archives")?;
        }
    }

    for entry in &args.tools {
        let (tool, variant) = match entry.split_once('=') {
            Some((tool, variant)) => (tool, Some(variant)),
            None => (entry.as_str(), None),
        };
        if session.state().tool(tool).is_none() {
            session
                .add_tool(tool)
                .with_context(|| format!("load tool {tool}"))?;
        }
        match variant {
            Some(variant) => session.set_tool_variant(tool, variant, true)?,
            None => session.toggle_tool_variants(tool, true)?,
        }
    }
    Ok(())
}
