use std::fmt;

use clap::ValueEnum;

/// Value of the `--dataset` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DatasetSelection {
    Cifar10,
    Caltech101,
    #[default]
    All,
}

impl DatasetSelection {
    /// Datasets covered by this selection, in acquisition order.
    pub fn datasets(self) -> Vec<Dataset> {
        match self {
            DatasetSelection::Cifar10 => vec![Dataset::Cifar10],
            DatasetSelection::Caltech101 => vec![Dataset::Caltech101],
            DatasetSelection::All => vec![Dataset::Cifar10, Dataset::Caltech101],
        }
    }
}

impl fmt::Display for DatasetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSelection::Cifar10 => write!(f, "cifar10"),
            DatasetSelection::Caltech101 => write!(f, "caltech101"),
            DatasetSelection::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Cifar10,
    Caltech101,
}

impl Dataset {
    pub fn display_name(&self) -> &'static str {
        match self {
            Dataset::Cifar10 => "CIFAR-10",
            Dataset::Caltech101 => "Caltech-101",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn is_train(&self) -> bool {
        matches!(self, Split::Train)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Train => write!(f, "train"),
            Split::Test => write!(f, "test"),
        }
    }
}

/// Conversion applied when samples are loaded. Acquisition never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    #[default]
    Identity,
    ToTensor,
}
