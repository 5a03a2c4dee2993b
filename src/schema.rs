//! Serialization schemas shaping data crossing the system boundary.
//!
//! One [`Schema`] per entity kind, each an independent declaration of which
//! fields are visible externally. Dump and load are pure field-mapping
//! transforms: no merging, no defaults inherited across kinds, no joins.

use omnibus_common::{
    EntityDescriptor, EntityKind, Error, FieldSpec, FieldValue, Representable, Representation,
    Result,
};

/// Field-mapping schema for one entity kind.
///
/// Outbound, `dump` restricts a representation to the declared field set and
/// coerces every value to its string or string-sequence form. Inbound,
/// `load` validates caller-supplied mutable fields for create and update.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    descriptor: &'static EntityDescriptor,
}

impl Schema {
    /// The schema for a kind.
    pub fn for_kind(kind: EntityKind) -> Self {
        Self {
            descriptor: EntityDescriptor::for_kind(kind),
        }
    }

    /// The field table backing this schema.
    pub fn descriptor(&self) -> &'static EntityDescriptor {
        self.descriptor
    }

    /// Project a representation onto the declared field set plus `title`.
    ///
    /// Missing fields become their shape's empty value and mis-shaped values
    /// are coerced, so dumping never fails and the output key set is always
    /// exactly the declared one.
    pub fn dump(&self, rep: &Representation) -> Representation {
        let mut out = Representation::new();

        let title = match rep.get("title") {
            Some(FieldValue::Text(title)) => title.clone(),
            _ => String::new(),
        };
        out.insert("title".to_string(), FieldValue::Text(title));

        for spec in self.descriptor.fields {
            out.insert(spec.name.to_string(), coerce(spec, rep.get(spec.name)));
        }

        out
    }

    /// Dump an entity via its [`Representable`] projection.
    pub fn dump_entity<E: Representable>(&self, entity: &E) -> Representation {
        self.dump(&entity.to_representation())
    }

    /// Dump a collection, preserving input order.
    pub fn dump_many(&self, reps: &[Representation]) -> Vec<Representation> {
        reps.iter().map(|rep| self.dump(rep)).collect()
    }

    /// Validate caller-supplied mutable fields for create or update.
    ///
    /// The title is output-only and rejected as input, as are undeclared
    /// fields and values of the wrong shape. Absent optional fields default
    /// to their empty value, so the result always covers the full declared
    /// field set.
    pub fn load(&self, input: &Representation) -> Result<Representation> {
        for (name, value) in input {
            if name == "title" {
                return Err(Error::validation("title", "Field is read-only"));
            }
            let spec = self
                .descriptor
                .field(name)
                .ok_or_else(|| Error::validation(name.as_str(), "Unknown field"))?;
            match value {
                FieldValue::Text(_) if !spec.multi => {}
                FieldValue::List(_) if spec.multi => {}
                FieldValue::Text(_) => {
                    return Err(Error::validation(spec.name, "Expected a list of strings"))
                }
                FieldValue::List(_) => return Err(Error::validation(spec.name, "Expected a string")),
            }
        }

        let mut out = Representation::new();
        for spec in self.descriptor.fields {
            let value = input
                .get(spec.name)
                .cloned()
                .unwrap_or_else(|| spec.empty_value());
            out.insert(spec.name.to_string(), value);
        }

        Ok(out)
    }
}

fn coerce(spec: &FieldSpec, value: Option<&FieldValue>) -> FieldValue {
    match (spec.multi, value) {
        (false, Some(FieldValue::Text(text))) => FieldValue::Text(text.clone()),
        (false, Some(FieldValue::List(items))) => {
            FieldValue::Text(items.first().cloned().unwrap_or_default())
        }
        (false, None) => FieldValue::Text(String::new()),
        (true, Some(FieldValue::List(items))) => FieldValue::List(items.clone()),
        (true, Some(FieldValue::Text(text))) if !text.is_empty() => {
            FieldValue::List(vec![text.clone()])
        }
        (true, _) => FieldValue::List(Vec::new()),
    }
}
