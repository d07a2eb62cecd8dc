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

use std::time::Duration;

use flog::Level;
use flog::Logger;
use flog::driver::FileDriver;
use flog::driver::Stdout;
use flog::file::FileWriter;

fn main() {
    let writer = FileWriter::builder("logs", "rolling.log")
        .rotate_format("%Y-%m-%d-%H")
        .max_size(1024 * 1024)
        .max_files(10)
        .write_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    Logger::builder()
        .max_level(Level::Info)
        .driver(Stdout::new("[%T][%L] %M"))
        .driver(FileDriver::new(writer))
        .apply()
        .unwrap();

    for i in 0..1000 {
        log::error!("Hello error! {i}");
        log::warn!("Hello warn! {i}");
        log::info!("Hello info! {i}");
        log::debug!("Hello debug! {i}");
    }

    flog::shutdown().unwrap();
}
