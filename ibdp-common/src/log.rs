// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use slog::{Drain, Logger};

/// A terminal logger filtered through the `RUST_LOG` environment variable.
/// This is the logger used by test drivers and interactive tools.
pub fn init_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_envlogger::new(drain).fuse();
    let drain = slog_async::Async::new(drain)
        .chan_size(0x2000)
        .build()
        .fuse();
    slog::Logger::root(drain, slog::o!())
}

/// A bunyan-formatted file logger for long-running simulations.
pub fn init_file_logger(filename: &str) -> Logger {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(filename)
        .expect("open log file");

    let drain = slog_bunyan::with_name("ibdp", file).build().fuse();
    let drain = slog_async::Async::new(drain)
        .chan_size(0x8000)
        .build()
        .fuse();
    slog::Logger::root(drain, slog::o!())
}
