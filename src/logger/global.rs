// Copyright 2024 FastLabs Developers
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

use std::sync::OnceLock;

use crate::Error;
use crate::ErrorKind;
use crate::Logger;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

pub(super) fn install(logger: Logger) -> Result<&'static Logger, Error> {
    let max_level = logger.max_level();

    let mut installed = false;
    let logger = DEFAULT_LOGGER.get_or_init(|| {
        installed = true;
        logger
    });
    if !installed {
        return Err(Error::new("default logger is already installed")
            .with_kind(ErrorKind::ConfigInvalid));
    }

    log::set_logger(logger)
        .map_err(|err| Error::new("failed to set the global log logger").with_source(err))?;
    log::set_max_level(max_level.into());
    Ok(logger)
}

/// The logger installed by [`LoggerBuilder::apply`], if any.
///
/// [`LoggerBuilder::apply`]: crate::LoggerBuilder::apply
pub fn default_logger() -> Option<&'static Logger> {
    DEFAULT_LOGGER.get()
}

/// Close the drivers of the default logger, waiting for file writers to drain.
///
/// Does nothing when no default logger is installed.
pub fn shutdown() -> Result<(), Error> {
    match DEFAULT_LOGGER.get() {
        Some(logger) => logger.close(),
        None => Ok(()),
    }
}
