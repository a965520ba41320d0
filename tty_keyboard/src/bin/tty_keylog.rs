// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Print the name of every key pressed, and every mouse report, until `q` or `Ctrl+C`.
//!
//! Useful to find out what a particular terminal sends, and how it decodes.
//!
//! ```text
//! cargo run --bin tty_keylog -- --enable-logging --key-timeout-ms 50
//! ```

use clap::Parser;
use clap_config::CLIArg;
use miette::IntoDiagnostic;
use std::{fmt::Display,
          io::{self, Write},
          time::Duration};
use tty_keyboard::{Key, KeyBuffer, Keyboard, KeyboardConfig, KeyboardReactions,
                   MouseProtocol, MouseReport, RawModeGuard, ShutdownSignal, TracingConfig,
                   key_name, terminal_fd, try_initialize_logging_global};

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    let should_log = cli_arg.global_options.enable_logging;

    should_log.then(|| {
        let config = TracingConfig::new_file(
            cli_arg.global_options.log_file.clone(),
            tracing_core::LevelFilter::DEBUG,
        );
        try_initialize_logging_global(config).ok();
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    });

    let config = KeyboardConfig::from(&cli_arg);
    let shutdown = ShutdownSignal::new();

    print_line("Press keys to see their names. `q` or `Ctrl+C` quits.");

    {
        let _raw_mode = RawModeGuard::new()?;
        let fd = terminal_fd().into_diagnostic()?;
        let mut keyboard = Keyboard::new(fd, KeyLogger::new(shutdown.clone()), config)?
            .with_shutdown_signal(shutdown.clone());

        while !shutdown.is_requested() {
            keyboard.process_keyboard_event();
        }
    }

    should_log.then(|| {
        tracing::debug!(message = "Stop logging...");
    });

    Ok(())
}

/// Prints each reaction on its own line. Raw mode turns off output post-processing,
/// so lines end in `\r\n`.
#[derive(Debug)]
struct KeyLogger {
    shutdown: ShutdownSignal,
}

impl KeyLogger {
    fn new(shutdown: ShutdownSignal) -> Self { Self { shutdown } }
}

impl KeyboardReactions for KeyLogger {
    fn key_pressed(&mut self, key: Key) {
        let name = key_name(key);
        if name.is_empty() {
            print_line(format_args!("{key:?}"));
        } else {
            print_line(format_args!("{name:<24} {key:?}"));
        }

        if matches!(key, Key::Char('q' | '\u{3}')) {
            self.shutdown.request();
        }
    }

    fn key_released(&mut self, _key: Key) {}

    fn escape_pressed(&mut self) { print_line("Escape"); }

    fn mouse_tracking(&mut self, protocol: MouseProtocol, buffer: &mut KeyBuffer) {
        match MouseReport::extract(protocol, buffer) {
            Some(report) => match report.fields() {
                Some(fields) => print_line(format_args!(
                    "{protocol:<24} button={} col={} row={}",
                    fields.button, fields.col, fields.row
                )),
                None => print_line(format_args!("{protocol:<24} {:?}", report.bytes)),
            },
            None => {
                // % is Display, ? is Debug.
                tracing::debug!(message = "Incomplete mouse report", protocol = %protocol);
            }
        }
    }
}

fn print_line(text: impl Display) {
    let mut stdout = io::stdout().lock();
    drop(write!(stdout, "{text}\r\n"));
    drop(stdout.flush());
}

impl From<&CLIArg> for KeyboardConfig {
    fn from(cli_arg: &CLIArg) -> Self {
        let defaults = KeyboardConfig::default();
        Self {
            keypress_timeout: cli_arg
                .key_timeout_ms
                .map_or(defaults.keypress_timeout, Duration::from_millis),
            read_blocking_time: cli_arg
                .poll_timeout_ms
                .map_or(defaults.read_blocking_time, Duration::from_millis),
            read_blocking_time_short: cli_arg
                .short_poll_timeout_ms
                .map_or(defaults.read_blocking_time_short, Duration::from_millis),
            utf8_input: !cli_arg.no_utf8,
            mouse_support: !cli_arg.no_mouse,
            non_blocking_input_support: defaults.non_blocking_input_support,
        }
    }
}

mod clap_config {
    use clap::{Args, Parser};

    /// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
    #[derive(Debug, Parser)]
    #[command(bin_name = "tty_keylog")]
    #[command(about = "⌨️ Show what your terminal sends for each key and mouse action")]
    #[command(version)]
    #[command(next_line_help = true)]
    #[command(arg_required_else_help(false))]
    pub struct CLIArg {
        #[arg(
            long,
            value_name = "ms",
            help = "Silence after which an ambiguous prefix like `ESC [` is resolved [default: 100]"
        )]
        pub key_timeout_ms: Option<u64>,

        #[arg(
            long,
            value_name = "ms",
            help = "How long to wait for input per event loop iteration [default: 100]"
        )]
        pub poll_timeout_ms: Option<u64>,

        #[arg(
            long,
            value_name = "ms",
            help = "Wait used instead while a sequence is incomplete [default: 5]"
        )]
        pub short_poll_timeout_ms: Option<u64>,

        #[arg(long, help = "Treat every byte as a Latin-1 character")]
        pub no_utf8: bool,

        #[arg(long, help = "Don't detect mouse reports")]
        pub no_mouse: bool,

        #[command(flatten)]
        pub global_options: GlobalOption,
    }

    #[derive(Debug, Args)]
    pub struct GlobalOption {
        #[arg(
            global = true,
            long,
            short = 'l',
            help = "Log decoder activity to a file for debugging."
        )]
        pub enable_logging: bool,

        #[arg(
            global = true,
            long,
            value_name = "path",
            requires = "enable_logging",
            help = "Log file path [default: tty_keyboard_log.txt]"
        )]
        pub log_file: Option<String>,
    }
}
