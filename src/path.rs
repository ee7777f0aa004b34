use std::fmt;

/// One step in a field path: either a named field or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seg {
    Field(String),
    Index(usize),
}

/// Stable address of a field inside the value tree.
///
/// Paths mirror the schema tree shape, so `chapters.1.title` means: the
/// `title` field of item 1 of the `chapters` list. The display form is the
/// identity key used for selection and editing state, which keeps nested
/// field state stable across list reorderings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(Vec<Seg>);

impl FieldPath {
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    pub fn field(name: &str) -> Self {
        FieldPath(vec![Seg::Field(name.to_string())])
    }

    /// Extend with a named field segment.
    pub fn child(&self, name: &str) -> Self {
        let mut segs = self.0.clone();
        segs.push(Seg::Field(name.to_string()));
        FieldPath(segs)
    }

    /// Extend with a list index segment.
    pub fn index(&self, i: usize) -> Self {
        let mut segs = self.0.clone();
        segs.push(Seg::Index(i));
        FieldPath(segs)
    }

    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    /// Path with the last segment removed. Root stays root.
    pub fn parent(&self) -> Self {
        let mut segs = self.0.clone();
        segs.pop();
        FieldPath(segs)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Last named segment, if any. Used for status messages.
    pub fn leaf_name(&self) -> Option<&str> {
        self.0.iter().rev().find_map(|seg| match seg {
            Seg::Field(name) => Some(name.as_str()),
            Seg::Index(_) => None,
        })
    }

    /// Parse a dotted key back into a path. Purely-numeric segments become
    /// indices, everything else a field name.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return FieldPath::root();
        }
        let segs = s
            .split('.')
            .map(|part| match part.parse::<usize>() {
                Ok(i) => Seg::Index(i),
                Err(_) => Seg::Field(part.to_string()),
            })
            .collect();
        FieldPath(segs)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match seg {
                Seg::Field(name) => write!(f, "{}", name)?,
                Seg::Index(idx) => write!(f, "{}", idx)?,
            }
        }
        Ok(())
    }
}
