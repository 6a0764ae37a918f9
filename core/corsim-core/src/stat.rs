use crate::world::{commons::HealthType, subject::Subject};

use std::{
    fs::File,
    ops::{Index, IndexMut},
    path::Path,
};

use arrow2::{
    array::{MutableArray, UInt32Vec},
    chunk::Chunk,
    datatypes::{DataType, Field, Schema},
    io::ipc::write::{Compression, FileWriter, WriteOptions},
};
use strum::{EnumCount, IntoEnumIterator};

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct HealthCount {
    counts: [u32; HealthType::COUNT],
    n_stationary: u32,
}

impl HealthCount {
    pub fn from_subjects<'a, I: IntoIterator<Item = &'a Subject>>(subjects: I) -> Self {
        let mut hc = Self::default();
        for s in subjects {
            hc[&s.health()] += 1;
            if s.is_stationary() {
                hc.n_stationary += 1;
            }
        }
        hc
    }

    pub fn n_infected(&self) -> u32 {
        self[&HealthType::Incubating]
    }

    pub fn n_stationary(&self) -> u32 {
        self.n_stationary
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

impl<'a> Index<&'a HealthType> for HealthCount {
    type Output = u32;

    fn index(&self, index: &'a HealthType) -> &Self::Output {
        &self.counts[index.index()]
    }
}

impl<'a> IndexMut<&'a HealthType> for HealthCount {
    fn index_mut(&mut self, index: &HealthType) -> &mut Self::Output {
        &mut self.counts[index.index()]
    }
}

impl std::fmt::Display for HealthCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for h in HealthType::iter() {
            write!(f, "{sep}{h}: {}", self[&h])?;
            sep = ", ";
        }
        Ok(())
    }
}

/// Per-tick history of health counts, one column per [`HealthType`].
#[derive(Debug)]
pub struct HealthStat {
    columns: Vec<UInt32Vec>,
}

impl Default for HealthStat {
    fn default() -> Self {
        Self {
            columns: HealthType::iter().map(|_| UInt32Vec::new()).collect(),
        }
    }
}

impl HealthStat {
    pub fn push(&mut self, count: &HealthCount) {
        for health in HealthType::iter() {
            self.columns[health.index()].push(Some(count[&health]));
        }
    }

    pub fn len(&self) -> usize {
        self.columns[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn export(&self, path: &Path) -> anyhow::Result<()> {
        let schema = Schema::from(
            HealthType::iter()
                .map(|h| Field::new(h.to_string(), DataType::UInt32, false))
                .collect::<Vec<_>>(),
        );
        let chunk = Chunk::try_new(self.columns.iter().map(|v| v.clone().as_box()).collect())?;
        let mut writer = FileWriter::try_new(
            File::create(path)?,
            schema,
            None,
            WriteOptions {
                compression: Some(Compression::ZSTD),
            },
        )?;
        writer.write(&chunk, None)?;
        writer.finish()?;
        tracing::info!("exported {} ticks to {}", chunk.len(), path.display());
        Ok(())
    }
}

#[derive(Default, Debug)]
pub struct Stat {
    pub n_transmissions: u64,
    pub health_stat: HealthStat,
}

impl Stat {
    pub fn reset(&mut self) {
        self.n_transmissions = 0;
        self.health_stat = HealthStat::default();
    }
}
