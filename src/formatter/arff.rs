use std::io::{self, Write};

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::datasets::labels::BinaryLabel;

pub const RELATION: &str = "imagens";

const HEADER_COMMENT: &str = "% 1. Title: Database de objetos\n\
                              %\n\
                              % 2. Sources\n\
                              %      Cifar-10 Database\n\
                              %\n";

/// Number of lines written by `write_header` for `dim` attributes
pub fn header_line_count(dim: usize) -> usize {
    // comments, relation + blank, attributes, class + blank, @data
    5 + 2 + dim + 2 + 1
}

/// Streams an arff file, one `real` attribute per feature and a trailing
/// nominal class attribute.
pub struct ArffWriter<W: Write> {
    out: W,
    dim: usize,
}

impl<W: Write> ArffWriter<W> {
    pub fn new(out: W, dim: usize) -> Self {
        Self { out, dim }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.out.write_all(HEADER_COMMENT.as_bytes())?;
        writeln!(self.out, "@relation {}\n", RELATION)?;
        for i in 0..self.dim {
            writeln!(self.out, "@attribute 'valueof{}' real", i)?;
        }
        let classes = BinaryLabel::iter().map(|l| l.arff_name()).join(", ");
        writeln!(self.out, "@attribute 'class' {{{}}}\n", classes)?;
        writeln!(self.out, "@data")
    }

    pub fn write_row(&mut self, features: &[f32], label: BinaryLabel) -> io::Result<()> {
        if features.len() != self.dim {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("row has {} values, header declares {}", features.len(), self.dim),
            ));
        }
        for v in features {
            write!(self.out, "{},", v)?;
        }
        writeln!(self.out, "{}", label.arff_name())
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
