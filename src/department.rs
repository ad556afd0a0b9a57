use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use log::{debug, trace};

use crate::error::Result;
use crate::roster::{ReaderOptions, Row};

/// A department and the distinct teams seen under it.  Team order is not meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    name: String,
    teams: HashSet<String>,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {} teams", self.name, self.teams.len())
    }
}

impl Department {
    pub fn new(name: &str) -> Self {
        Department {
            name: String::from(name),
            teams: HashSet::new(),
        }
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn teams(&self) -> &HashSet<String> {
        &self.teams
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.teams.contains(team)
    }

    /// Returns false if the team was already listed.
    pub fn add_team(&mut self, team: &str) -> bool {
        if self.teams.contains(team) {
            return false;
        }

        self.teams.insert(String::from(team))
    }
}

/// Departments in the order they first appear in the roster, each with its set of teams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    departments: Vec<Department>,
    index: HashMap<String, usize>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the whole roster at `path` (header excluded) and group teams by department.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(path, ReaderOptions::default())
    }

    pub fn load<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let hierarchy = Self::from_rows(options.open(path)?)?;

        debug!(
            "built hierarchy from {}: {} departments, {} teams",
            path.display(),
            hierarchy.len(),
            hierarchy.team_count()
        );
        for department in &hierarchy {
            trace!("{}", department);
        }

        Ok(hierarchy)
    }

    /// Fails on the first row without a team column; nothing partial is returned.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Row>>,
    {
        let mut hierarchy = Hierarchy::new();

        for row in rows {
            let row = row?;
            hierarchy.add(row.department()?, row.team()?);
        }

        Ok(hierarchy)
    }

    pub fn add(&mut self, department: &str, team: &str) {
        let position = match self.index.get(department) {
            Some(&i) => i,
            None => {
                self.departments.push(Department::new(department));
                self.index.insert(String::from(department), self.departments.len() - 1);
                self.departments.len() - 1
            },
        };

        self.departments[position].add_team(team);
    }

    pub fn get(&self, department: &str) -> Option<&Department> {
        self.index.get(department).map(|&i| &self.departments[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Department> {
        self.departments.iter()
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Total of distinct teams summed over all departments.
    pub fn team_count(&self) -> usize {
        self.departments.iter().map(|d| d.teams.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Hierarchy {
    type Item = &'a Department;
    type IntoIter = std::slice::Iter<'a, Department>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
