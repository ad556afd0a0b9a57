use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use log::{debug, trace};

use crate::error::Result;
use crate::roster::{ReaderOptions, Row};

/// Running salary aggregate for one department.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentStats {
    pub count: u64,
    pub sum_salary: u128,
    pub min_salary: u64,
    pub max_salary: u64,
}

impl Default for DepartmentStats {
    fn default() -> Self {
        DepartmentStats {
            count: 0,
            sum_salary: 0,
            min_salary: u64::MAX,
            max_salary: u64::MIN,
        }
    }
}

impl DepartmentStats {
    pub fn record(&mut self, salary: u64) {
        self.count += 1;
        self.sum_salary += u128::from(salary);
        self.min_salary = self.min_salary.min(salary);
        self.max_salary = self.max_salary.max(salary);
    }

    /// Mean salary as a float.  An empty aggregate averages to 0.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }

        self.sum_salary as f64 / self.count as f64
    }
}

impl fmt::Display for DepartmentStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} employees, {} - {}, avg {:.2}",
            self.count,
            self.min_salary,
            self.max_salary,
            self.average()
        )
    }
}

/// Per-department salary statistics, kept in the order departments first appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    entries: Vec<(String, DepartmentStats)>,
    index: HashMap<String, usize>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the whole roster at `path` (header excluded) and aggregate salaries per department.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(path, ReaderOptions::default())
    }

    pub fn load<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let statistics = Self::from_rows(options.open(path)?)?;

        debug!(
            "built statistics from {}: {} departments, {} employees",
            path.display(),
            statistics.len(),
            statistics.headcount()
        );
        for (department, stats) in statistics.iter() {
            trace!("{}: {}", department, stats);
        }

        Ok(statistics)
    }

    /// A single bad row aborts the whole aggregation.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Row>>,
    {
        let mut statistics = Statistics::new();

        for row in rows {
            let row = row?;
            let salary = row.salary()?;
            statistics.record(row.department()?, salary);
        }

        Ok(statistics)
    }

    pub fn record(&mut self, department: &str, salary: u64) {
        let position = match self.index.get(department) {
            Some(&i) => i,
            None => {
                self.entries.push((String::from(department), DepartmentStats::default()));
                self.index.insert(String::from(department), self.entries.len() - 1);
                self.entries.len() - 1
            },
        };

        self.entries[position].1.record(salary);
    }

    pub fn get(&self, department: &str) -> Option<&DepartmentStats> {
        self.index.get(department).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DepartmentStats)> {
        self.entries.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn headcount(&self) -> u64 {
        self.entries.iter().map(|(_, stats)| stats.count).sum()
    }
}
