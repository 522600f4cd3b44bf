use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use num_traits::cast::ToPrimitive;
use squat_counter::{
    metric::Strategy, record::FrameRecord, Config, Error, RepDetector, Session,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};
use structopt::StructOpt;
use tracing::{info, trace, warn};
use tracing_subscriber::layer::SubscriberExt;

#[derive(structopt::StructOpt)]
struct Opt {
    /// JSON lines of pose landmarks, one frame per line. Reads stdin when omitted or "-".
    input: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Minimum landmark visibility, overriding the configuration file.
    #[structopt(short = "v", long)]
    min_visibility: Option<f32>,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(short, long)]
    show_progress: bool,

    /// Metric strategy, overriding the configuration file.
    #[structopt(subcommand)]
    metric: Option<Strategy>,
}

fn open_input<'a>(input: Option<&Path>, stdin: &'a io::Stdin) -> Result<Box<dyn BufRead + 'a>> {
    Ok(match input {
        None => Box::new(stdin.lock()),
        Some(path) if path == Path::new("-") => Box::new(stdin.lock()),
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open input {:?}", path))?,
        )),
    })
}

fn frames_per_second(frames: usize, started: Instant) -> Result<f64, Error> {
    let frames = frames.to_f64().ok_or(Error::ConvertToF64)?;
    Ok(frames / started.elapsed().as_secs_f64().max(f64::EPSILON))
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(opt.log_level),
    )?;

    let mut config = match opt.config.as_deref() {
        Some(path) => Config::load(path).context("failed loading configuration")?,
        None => Config::default(),
    };
    if let Some(min_visibility) = opt.min_visibility {
        config.min_visibility = min_visibility;
    }
    if let Some(metric) = opt.metric {
        config.metric = metric;
    }

    info!(
        message = "starting session",
        metric = ?config.metric,
        min_visibility = config.min_visibility,
        baseline_ceiling = ?config.calibration.baseline_ceiling
    );

    let mut session =
        Session::new(RepDetector::from_config(&config).context("failed constructing detector")?);

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let pb_status = if opt.show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };

    let stdin = io::stdin();
    let reader = open_input(opt.input.as_deref(), &stdin)?;
    let started = Instant::now();

    for (index, line) in reader.lines().enumerate() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let line_num = index + 1;
        let line = line.map_err(Error::ReadFrame)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let frame = FrameRecord::parse(line, line_num)?;
        let outcome = match session.observe(frame.as_ref()) {
            Some(outcome) => outcome,
            None => {
                trace!(line_num, "no pose in frame");
                continue;
            }
        };

        if outcome.is_rep {
            println!("rep {} at line {}", session.reps(), line_num);
        }

        if let Some(pb_status) = pb_status.as_ref() {
            pb_status.set_message(format!(
                "reps: {} | {} ({}) | {}",
                session.reps(),
                session.stage(),
                session.phase(),
                session.feedback(),
            ));
            pb_status.inc(1);
        }
    }

    if let Some(pb_status) = pb_status {
        pb_status.finish_and_clear();
    }

    if session.frames() == 0 {
        warn!("no frame in the input carried a pose");
    }

    let fps = frames_per_second(session.frames(), started)?;
    info!(
        message = "session finished",
        reps = session.reps(),
        frames = session.frames(),
        fps,
        feedback = %session.feedback()
    );
    println!("total reps: {}", session.reps());

    Ok(())
}
