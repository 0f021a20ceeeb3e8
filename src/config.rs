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
use config::FileFormat;
use serde::Deserialize;
use serde_with::serde_as;
use serde_with::DisplayFromStr;
use std::path::Path;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

const DEFAULT_YAML: &str = include_str!("../default_config.yaml");

#[derive(Debug, Deserialize)]
pub struct Config {
    pub buffer: BufferSettings,
    pub log: Log,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BufferSettings {
    pub capacity: usize,
    pub upper_border: usize,
    pub grow_to: usize,
    pub lower_border: usize,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct Log {
    #[serde_as(as = "DisplayFromStr")]
    pub level: LevelFilter,
    pub stdout: bool,
    pub coloring: bool,
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Layers `config_file` (if it exists) over the compiled-in defaults.
    /// `capacity` takes precedence over both.
    pub fn load(config_file: Option<&Path>, capacity: Option<usize>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_YAML, FileFormat::Yaml));

        if let Some(config_file) = config_file {
            builder = builder.add_source(
                config::File::new(&config_file.to_string_lossy(), FileFormat::Yaml).required(false),
            );
        }

        if let Some(capacity) = capacity {
            builder = builder.set_override("buffer.capacity", i64::try_from(capacity)?)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}
