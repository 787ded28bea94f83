/// Destination root used when none is given.
pub const DEFAULT_DESTINATION: &str = "./data";

pub const CALTECH101_URL: &str =
    "https://data.caltech.edu/records/mzrjq-6wc02/files/caltech-101.zip?download=1";

pub const CIFAR10_URL: &str = "https://www.cs.toronto.edu/~kriz/cifar-10-python.tar.gz";

/// Where Caltech-101 comes from and the names its archives unpack to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caltech101Source {
    pub url: String,
    pub archive_name: String,
    /// Directory the outer zip unpacks into.
    pub staging_dir: String,
    /// Archive inside the staging directory holding the categories.
    pub nested_archive: String,
    pub final_dir: String,
    /// Platform metadata directory some zip tools add.
    pub metadata_dir: String,
}

impl Default for Caltech101Source {
    fn default() -> Self {
        Self {
            url: CALTECH101_URL.to_string(),
            archive_name: "caltech-101.zip".to_string(),
            staging_dir: "caltech-101".to_string(),
            nested_archive: "101_ObjectCategories.tar.gz".to_string(),
            final_dir: "101_ObjectCategories".to_string(),
            metadata_dir: "__MACOSX".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cifar10Source {
    pub url: String,
    pub archive_name: String,
    pub extracted_dir: String,
    pub train_batches: Vec<String>,
    pub test_batches: Vec<String>,
}

impl Default for Cifar10Source {
    fn default() -> Self {
        Self {
            url: CIFAR10_URL.to_string(),
            archive_name: "cifar-10-python.tar.gz".to_string(),
            extracted_dir: "cifar-10-batches-py".to_string(),
            train_batches: (1..=5).map(|i| format!("data_batch_{i}")).collect(),
            test_batches: vec!["test_batch".to_string()],
        }
    }
}
