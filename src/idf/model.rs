use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use slotmap::SlotMap;
use tracing::{debug, info};

use crate::error::{IdfError, Result};

use super::idd::Idd;
use super::parser::parse_objects;

slotmap::new_key_type! {
    /// Unique identifier for an object in an [`IdfModel`].
    pub struct ObjectId;
}

/// A single IDF object: a class name and its field values as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdfObject {
    class: String,
    fields: Vec<String>,
}

impl IdfObject {
    /// Creates an object. The class name is not checked against any
    /// dictionary until the object is added to a model.
    #[must_use]
    pub fn new<S: Into<String>>(class: impl Into<String>, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            class: class.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the class name.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns `true` if this object belongs to `class` (case-insensitive).
    #[must_use]
    pub fn is_class(&self, class: &str) -> bool {
        self.class.eq_ignore_ascii_case(class)
    }

    /// Returns the field values, excluding the class name.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the field at `index`, if present.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Returns the first field, which holds the name for named classes.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.field(0)
    }
}

/// An in-memory IDF document bound to a data dictionary.
///
/// Objects keep their insertion order, which is also the order they are
/// written back in.
#[derive(Debug, Clone)]
pub struct IdfModel<'i> {
    idd: &'i Idd,
    objects: SlotMap<ObjectId, IdfObject>,
    order: Vec<ObjectId>,
    path: Option<PathBuf>,
}

impl<'i> IdfModel<'i> {
    /// Creates an empty model.
    #[must_use]
    pub fn new(idd: &'i Idd) -> Self {
        Self {
            idd,
            objects: SlotMap::with_key(),
            order: Vec::new(),
            path: None,
        }
    }

    /// Parses IDF text against `idd`.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed text, or
    /// [`IdfError::UnknownClass`] if an object's class is not in `idd`.
    pub fn parse(idd: &'i Idd, text: &str) -> Result<Self> {
        let mut model = Self::new(idd);
        for raw in parse_objects(text)? {
            model.add_object(IdfObject::new(raw.class, raw.fields))?;
        }
        debug!(objects = model.len(), "parsed model");
        Ok(model)
    }

    /// Reads and parses an IDF file. The path is remembered for [`save`].
    ///
    /// [`save`]: IdfModel::save
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::Io`] if the file cannot be read, or any error
    /// from [`IdfModel::parse`].
    pub fn load(idd: &'i Idd, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| IdfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut model = Self::parse(idd, &text)?;
        model.path = Some(path.to_path_buf());
        Ok(model)
    }

    /// Returns the dictionary this model is validated against.
    #[must_use]
    pub fn idd(&self) -> &'i Idd {
        self.idd
    }

    /// Returns the file this model was loaded from.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the model holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the object with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::ObjectNotFound`] if the id is not in this model.
    pub fn object(&self, id: ObjectId) -> std::result::Result<&IdfObject, IdfError> {
        self.objects.get(id).ok_or(IdfError::ObjectNotFound)
    }

    /// Iterates over all objects in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &IdfObject)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.objects.get(id).map(|obj| (id, obj)))
    }

    /// Iterates over the objects of `class` (case-insensitive) in document
    /// order.
    pub fn objects_of<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a IdfObject> + 'a {
        self.iter()
            .map(|(_, obj)| obj)
            .filter(move |obj| obj.is_class(class))
    }

    /// Returns the first object of `class` whose name equals `name`.
    #[must_use]
    pub fn find_named(&self, class: &str, name: &str) -> Option<&IdfObject> {
        self.iter()
            .map(|(_, obj)| obj)
            .find(|obj| obj.is_class(class) && obj.name() == Some(name))
    }

    /// Appends an object. Its class name is replaced by the dictionary
    /// spelling.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::UnknownClass`] if the class is not in the
    /// dictionary.
    pub fn add_object(&mut self, mut object: IdfObject) -> Result<ObjectId> {
        let class = self
            .idd
            .class(&object.class)
            .ok_or_else(|| IdfError::UnknownClass(object.class.clone()))?;
        if class.name() != object.class {
            object.class = class.name().to_owned();
        }
        let id = self.objects.insert(object);
        self.order.push(id);
        Ok(id)
    }

    /// Appends a copy of `object`, which may come from another model.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::UnknownClass`] if the class is not in the
    /// dictionary.
    pub fn copy_object(&mut self, object: &IdfObject) -> Result<ObjectId> {
        self.add_object(object.clone())
    }

    /// Writes the model back to the file it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::NoSourcePath`] if the model was not loaded from a
    /// file, or [`IdfError::Io`] if writing fails.
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(IdfError::NoSourcePath)?;
        self.write_to(path)
    }

    /// Writes the model to `path` and remembers it for later saves.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::Io`] if writing fails.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string()).map_err(|source| IdfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), objects = self.len(), "saved model");
        Ok(())
    }
}

/// Width of the value column before the `!-` field comment.
const VALUE_WIDTH: usize = 25;

impl fmt::Display for IdfModel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, object) in self.iter() {
            let class = self.idd.class(object.class());
            if object.fields.is_empty() {
                writeln!(f, "{};", object.class)?;
                writeln!(f)?;
                continue;
            }
            writeln!(f, "{},", object.class)?;
            let last = object.fields.len() - 1;
            for (i, value) in object.fields.iter().enumerate() {
                let sep = if i == last { ';' } else { ',' };
                let cell = format!("{value}{sep}");
                match class.and_then(|c| c.field_label(i)) {
                    Some(name) => writeln!(f, "    {cell:<width$}!- {name}", width = VALUE_WIDTH)?,
                    None => writeln!(f, "    {cell}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
