use std::fmt;

use strum::EnumIter;

/// The original CIFAR-10 classes, indexed by label
pub const LABEL_NAMES: [&str; 10] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];

/// The two project classes, the discriminant is the encoded label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum BinaryLabel {
    Animal = 0,
    NotAnimal = 1,
}

impl BinaryLabel {
    /// bird, cat, deer, dog, frog and horse (2..=7) are animals
    pub fn from_original(label: u8) -> Self {
        if (2..=7).contains(&label) {
            BinaryLabel::Animal
        } else {
            BinaryLabel::NotAnimal
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BinaryLabel::Animal),
            1 => Some(BinaryLabel::NotAnimal),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Class literal used in the arff files, kept identical to the files
    /// downstream WEKA setups were built against.
    pub fn arff_name(self) -> &'static str {
        match self {
            BinaryLabel::Animal => "Animal",
            BinaryLabel::NotAnimal => "Nao_Animal",
        }
    }
}

impl fmt::Display for BinaryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryLabel::Animal => write!(f, "Animal"),
            BinaryLabel::NotAnimal => write!(f, "Not-Animal"),
        }
    }
}

/// Maps every original label onto its binary code, preserving order
pub fn remap_labels(labels: &[u8]) -> Vec<u8> {
    labels
        .iter()
        .map(|l| BinaryLabel::from_original(*l).code())
        .collect()
}

pub fn original_name(label: u8) -> Option<&'static str> {
    LABEL_NAMES.get(label as usize).copied()
}
