use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::error::{IdfError, Result};

use super::parser::{parse_idd_items, IddItem};

/// A field of an IDD class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    code: String,
    name: Option<String>,
}

impl FieldDef {
    /// Returns the field code, e.g. `A1` or `N3`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the `\field` name, if the dictionary gives one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` for numeric (`N`) fields.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.code.starts_with(['N', 'n'])
    }
}

/// An IDD class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    name: String,
    fields: Vec<FieldDef>,
    extensible: Option<usize>,
    begin_extensible: Option<usize>,
}

impl ClassDef {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            fields: Vec::new(),
            extensible: None,
            begin_extensible: None,
        }
    }

    /// Returns the class name as spelled in the dictionary.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared fields, excluding the class name itself.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Returns the size of the repeating field group, if the class is
    /// extensible.
    #[must_use]
    pub fn extensible(&self) -> Option<usize> {
        self.extensible
    }

    /// Returns the position of the field called `name` (case-insensitive).
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    /// Returns the name of the field at `index`, if declared.
    #[must_use]
    pub fn field_name(&self, index: usize) -> Option<&str> {
        self.fields.get(index).and_then(FieldDef::name)
    }

    /// Returns the name of the field at `index`, extending the repeating
    /// group of an extensible class past the declared fields.
    ///
    /// The group number in the name follows the position, so field 23 of
    /// `BuildingSurface:Detailed` is `Vertex 5 X-coordinate`.
    #[must_use]
    pub fn field_label(&self, index: usize) -> Option<Cow<'_, str>> {
        if let Some(name) = self.field_name(index) {
            return Some(Cow::Borrowed(name));
        }
        let size = self.extensible.filter(|&n| n > 0)?;
        let start = self
            .begin_extensible
            .or_else(|| self.fields.len().checked_sub(size))?;
        let offset = index.checked_sub(start)?;
        let first = self.field_name(start + offset % size)?;
        Some(Cow::Owned(renumber(first, offset / size + 1)))
    }

    fn apply_directive(&mut self, directive: &str) {
        if let Some(name) = directive.strip_prefix("field ") {
            if let Some(field) = self.fields.last_mut() {
                field.name = Some(name.trim().to_owned());
            }
        } else if directive.starts_with("begin-extensible") {
            self.begin_extensible = self.fields.len().checked_sub(1);
        } else if let Some(rest) = directive.strip_prefix("extensible:") {
            if self.fields.is_empty() {
                let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
                self.extensible = digits.parse().ok();
            }
        }
    }
}

/// Replaces the first number in `name` with `group`.
fn renumber(name: &str, group: usize) -> String {
    let Some(start) = name.find(|c: char| c.is_ascii_digit()) else {
        return name.to_owned();
    };
    let end = name[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(name.len(), |len| start + len);
    format!("{}{group}{}", &name[..start], &name[end..])
}

/// An EnergyPlus data dictionary (`Energy+.idd`).
///
/// Class lookup is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Idd {
    classes: Vec<ClassDef>,
    index: HashMap<String, usize>,
    source: Option<PathBuf>,
}

impl Idd {
    /// Parses dictionary text.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::Parse`] if the text is not a well-formed
    /// dictionary.
    pub fn parse(text: &str) -> Result<Self> {
        let items = parse_idd_items(text)?;

        let mut classes: Vec<ClassDef> = Vec::new();
        let mut current: Option<ClassDef> = None;
        let mut open = false;

        for item in items {
            match item {
                IddItem::Token(text, sep) => {
                    if open {
                        if let Some(class) = current.as_mut() {
                            class.fields.push(FieldDef {
                                code: text.to_owned(),
                                name: None,
                            });
                        }
                    } else {
                        classes.extend(current.take());
                        current = Some(ClassDef::new(text));
                    }
                    open = sep == ',';
                }
                IddItem::Directive(directive) => {
                    // Field directives follow the field they describe, even
                    // after the terminating `;`.
                    if let Some(class) = current.as_mut() {
                        class.apply_directive(directive);
                    }
                }
            }
        }
        classes.extend(current);

        let mut index = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            if index.insert(class.name.to_ascii_lowercase(), i).is_some() {
                warn!(class = %class.name, "duplicate class definition, keeping the last one");
            }
        }

        debug!(classes = classes.len(), "parsed data dictionary");
        Ok(Self {
            classes,
            index,
            source: None,
        })
    }

    /// Reads and parses a dictionary file.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::Io`] if the file cannot be read, or a parse error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| IdfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut idd = Self::parse(&text)?;
        idd.source = Some(path.to_path_buf());
        Ok(idd)
    }

    /// Returns the file this dictionary was read from.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the class definition named `name` (case-insensitive).
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassDef> {
        self.index
            .get(&name.to_ascii_lowercase())
            .and_then(|&i| self.classes.get(i))
    }

    /// Returns all class definitions in dictionary order.
    #[must_use]
    pub fn classes(&self) -> &[ClassDef] {
        &self.classes
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if the dictionary defines no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

static GLOBAL_IDD: OnceLock<Idd> = OnceLock::new();

/// Loads the process-wide dictionary from `path` on first use.
///
/// Later calls return the dictionary loaded first, whatever path they pass.
///
/// # Errors
///
/// Returns an error if the dictionary has not been loaded yet and `path`
/// cannot be read or parsed.
pub fn set_idd(path: impl AsRef<Path>) -> Result<&'static Idd> {
    let path = path.as_ref();
    if let Some(idd) = GLOBAL_IDD.get() {
        if idd.source() != Some(path) {
            debug!(
                requested = %path.display(),
                "data dictionary already loaded, ignoring new path"
            );
        }
        return Ok(idd);
    }
    let idd = Idd::from_path(path)?;
    Ok(GLOBAL_IDD.get_or_init(|| idd))
}
