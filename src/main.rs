// Copyright 2023 Turing Machines
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
#![deny(clippy::mod_module_files)]
mod config;
mod demo;

use crate::config::{Config, Log};
use anyhow::Context;
use clap::{command, value_parser, Arg, ArgMatches};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> anyhow::Result<()> {
    let args = cli_args();
    let config = Config::load(
        args.get_one::<PathBuf>("config").map(PathBuf::as_path),
        args.get_one::<usize>("capacity").copied(),
    )
    .context("Error parsing config file")?;

    let _logger_lifetime = init_logger(&config.log)?;

    let buffer = demo::run(&config.buffer)?;
    tracing::info!(
        "exiting {}, last status {}",
        env!("CARGO_PKG_NAME"),
        buffer.last_status()
    );
    Ok(())
}

fn init_logger(log: &Log) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match &log.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::Builder::new()
                .rotation(Rotation::HOURLY)
                .max_log_files(3)
                .filename_prefix("cyclic-buffer.log")
                .build(directory)
                .context("error setting up log rotation")?;

            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stdout_layer = log.stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .without_time()
            .with_ansi(log.coloring)
            .with_writer(std::io::stdout)
            .compact()
    });

    let targets = Targets::default().with_default(log.level);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .with(targets)
        .init();

    tracing::info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Ok(guard)
}

fn cli_args() -> ArgMatches {
    command!()
        .arg(
            Arg::new("config")
                .long("config")
                .help("YAML file layered over the built-in defaults")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("capacity")
                .long("capacity")
                .help("number of bytes to allocate, overrides the config file")
                .value_parser(value_parser!(usize)),
        )
        .get_matches()
}
