use std::cell::Cell;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tickdraw::app::{AppConfig, Color, KeyCode, Session, WinitPlatform};
use tickdraw::{build_info, health, logging};

#[derive(Parser)]
#[command(version, about = "Bouncing-shape demo for the tickdraw session", long_about = None)]
pub struct Cli {
    /// Surface width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Config profile (defaults to APP_PROFILE, then "release")
    #[arg(short, long)]
    profile: Option<String>,

    /// Run the health checks and exit
    #[arg(long)]
    check: bool,
}

/// A ball bouncing off the surface edges
struct Ball {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    radius: i32,
}

impl Ball {
    fn step(&mut self, width: i32, height: i32) {
        self.x += self.dx;
        self.y += self.dy;
        if self.x - self.radius < 0 || self.x + self.radius >= width {
            self.dx = -self.dx;
            self.x = self.x.max(self.radius).min(width - 1 - self.radius);
        }
        if self.y - self.radius < 0 || self.y + self.radius >= height {
            self.dy = -self.dy;
            self.y = self.y.max(self.radius).min(height - 1 - self.radius);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    }
    .context("failed to load configuration")?;
    logging::init(&config.logging);

    if cli.check {
        let report = health::run_all_checks();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    info!(
        version = %build_info::version_string(),
        profile = %config.profile,
        "Starting tickdraw demo"
    );

    let platform = WinitPlatform::new(config.window).context("failed to create event loop")?;
    let mut session = Session::initialize(platform, cli.width, cli.height)
        .context("failed to open the game window")?;

    let escape = Rc::new(Cell::new(false));
    let escape_seen = Rc::clone(&escape);
    session.set_key_released_callback(move |key: KeyCode| {
        info!(%key, "Key released");
        if key == KeyCode::ESCAPE {
            escape_seen.set(true);
        }
    });

    let (width, height) = (cli.width as i32, cli.height as i32);
    let mut ball = Ball {
        x: width / 2,
        y: height / 2,
        dx: 3,
        dy: 2,
        radius: (width.min(height) / 12).max(2),
    };

    while session.is_running() && !escape.get() {
        session.wait_for_tick()?;

        // Holding space freezes the ball
        if !session.key_down(KeyCode::SPACE) {
            ball.step(width, height);
        }

        session.fill(Color::rgb(16, 16, 32));
        session.draw_triangle(
            width / 2,
            height / 8,
            width / 8,
            height * 7 / 8,
            width * 7 / 8,
            height * 7 / 8,
            Color::rgb(80, 200, 120),
        );
        session.draw_filled_ellipse(
            ball.x,
            ball.y,
            ball.radius,
            ball.radius,
            Color::rgba(240, 80, 60, 200),
        );
        session.draw_ellipse(
            ball.x,
            ball.y,
            ball.radius + 4,
            ball.radius / 2 + 4,
            Color::WHITE,
        );
        session.present()?;
    }

    session.release();
    info!("Demo finished");
    Ok(())
}
