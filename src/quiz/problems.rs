use rand::seq::SliceRandom;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;
use crate::quiz::Problem;

/// Problems in the order they will be asked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemSet {
    problems: Vec<Problem>,
}

impl ProblemSet {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_reader(file)?;
        log::info!("Loaded {} problems from {}", set.len(), path.display());
        Ok(set)
    }

    /// Reads `question,answer` records. There is no header row.
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut problems = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            if record.len() != 2 {
                return Err(LoadError::Malformed {
                    record: index + 1,
                    fields: record.len(),
                });
            }
            problems.push(Problem::new(&record[0], &record[1]));
        }

        Ok(Self { problems })
    }

    pub fn shuffle(&mut self) {
        self.problems.shuffle(&mut rand::thread_rng());
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.problems.iter()
    }

    pub fn into_inner(self) -> Vec<Problem> {
        self.problems
    }
}

impl From<Vec<Problem>> for ProblemSet {
    fn from(problems: Vec<Problem>) -> Self {
        Self::new(problems)
    }
}
