//! Payload type synthesis.

use super::value::ValueKind;
use crate::classify::TypeShape;
use crate::contract::{ContractIndex, Element, TypeDef};
use crate::utils::to_snake_case;

// External imports (alphabetized)
use serde::Serialize;

/// Root element name used when a type does not say how to marshal itself
pub const DEFAULT_ROOT_TAG: &str = "Data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeField {
    pub name: String,
    pub ident: String,
    pub xml_tag: String,
    pub kind: ValueKind,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarElementField {
    pub name: String,
    pub ident: String,
    pub xml_tag: String,
    pub kind: ValueKind,
    /// Set when the field holds another (non-enum) contract type
    pub type_ref: Option<String>,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListElementField {
    pub name: String,
    pub ident: String,
    pub xml_tag: String,
    /// Kind of one list entry
    pub component: ValueKind,
    pub type_ref: Option<String>,
    /// Wrapper element around the entries, e.g. `Objects` around `Object`
    pub enclosing_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum TypeBody {
    Fields {
        attributes: Vec<AttributeField>,
        elements: Vec<ScalarElementField>,
        lists: Vec<ListElementField>,
    },
    Enum {
        values: Vec<EnumValue>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeUnit {
    /// Simple name
    pub name: String,
    /// Fully qualified contract name
    pub source: String,
    pub shape: TypeShape,
    pub root_tag: Option<String>,
    pub body: TypeBody,
}

/// Root element for a marshalled type: absent means the default, empty means none
fn root_tag(name_to_marshal: Option<&str>) -> Option<String> {
    match name_to_marshal {
        None => Some(DEFAULT_ROOT_TAG.to_string()),
        Some("") => None,
        Some(name) => Some(name.to_string()),
    }
}

fn xml_tag(element: &Element) -> String {
    element
        .xml_tag
        .clone()
        .unwrap_or_else(|| element.name.clone())
}

/// Synthesize one classified type.
///
/// The shape must come from the classifier, which has already rejected
/// types that are both or neither enum- and field-shaped.
pub fn synthesize_type(t: &TypeDef, shape: TypeShape, index: &ContractIndex<'_>) -> TypeUnit {
    let body = match shape {
        TypeShape::Enum => TypeBody::Enum {
            values: t
                .enum_constants
                .iter()
                .map(|name| EnumValue { name: name.clone() })
                .collect(),
        },
        TypeShape::TopLevel | TypeShape::Nested => {
            let mut attributes = Vec::new();
            let mut elements = Vec::new();
            let mut lists = Vec::new();

            for element in &t.elements {
                let ident = to_snake_case(&element.name);
                match element.component_type.as_deref() {
                    Some(component) => {
                        let component = ValueKind::resolve(component, None, index);
                        lists.push(ListElementField {
                            name: element.name.clone(),
                            ident,
                            xml_tag: xml_tag(element),
                            type_ref: component.type_ref().map(str::to_string),
                            component,
                            enclosing_tag: element.enclosing_tag.clone(),
                        });
                    }
                    None if element.attribute => attributes.push(AttributeField {
                        name: element.name.clone(),
                        ident,
                        xml_tag: xml_tag(element),
                        kind: ValueKind::resolve(&element.type_name, None, index),
                        nullable: element.nullable,
                    }),
                    None => {
                        let kind = ValueKind::resolve(&element.type_name, None, index);
                        elements.push(ScalarElementField {
                            name: element.name.clone(),
                            ident,
                            xml_tag: xml_tag(element),
                            type_ref: kind.type_ref().map(str::to_string),
                            kind,
                            nullable: element.nullable,
                        });
                    }
                }
            }

            TypeBody::Fields {
                attributes,
                elements,
                lists,
            }
        }
    };

    let root_tag = match shape {
        TypeShape::Enum => None,
        _ => root_tag(t.name_to_marshal.as_deref()),
    };

    TypeUnit {
        name: t.simple_name().to_string(),
        source: t.name.clone(),
        shape,
        root_tag,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Contract;

    fn type_def(name: &str, elements: Vec<Element>) -> TypeDef {
        TypeDef {
            name: name.into(),
            name_to_marshal: None,
            elements,
            enum_constants: vec![],
        }
    }

    fn fields(unit: &TypeUnit) -> (&[AttributeField], &[ScalarElementField], &[ListElementField]) {
        match &unit.body {
            TypeBody::Fields {
                attributes,
                elements,
                lists,
            } => (attributes.as_slice(), elements.as_slice(), lists.as_slice()),
            TypeBody::Enum { .. } => panic!("expected a field-shaped unit"),
        }
    }

    fn contract() -> Contract {
        let mut owner = Element::new("Owner", "com.spectralogic.s3.server.domain.User");
        owner.nullable = true;
        let mut id = Element::new("Id", "java.util.UUID");
        id.attribute = true;
        id.xml_tag = Some("ID".into());
        Contract {
            operations: vec![],
            types: vec![
                type_def(
                    "com.spectralogic.s3.server.domain.User",
                    vec![Element::new("DisplayName", "java.lang.String")],
                ),
                TypeDef {
                    name: "com.spectralogic.s3.common.dao.domain.ds3.Priority".into(),
                    name_to_marshal: None,
                    elements: vec![],
                    enum_constants: vec!["URGENT".into(), "HIGH".into(), "LOW".into()],
                },
                type_def(
                    "com.spectralogic.s3.server.domain.BucketApiBean",
                    vec![
                        id,
                        owner,
                        Element::new("Priority", "com.spectralogic.s3.common.dao.domain.ds3.Priority"),
                        Element::new("Unknown", "com.spectralogic.Gone"),
                    ],
                ),
            ],
        }
    }

    #[test]
    fn test_field_kinds() {
        let contract = contract();
        let index = ContractIndex::new(&contract);
        let unit = synthesize_type(&contract.types[2], TypeShape::Nested, &index);
        let (attributes, elements, lists) = fields(&unit);

        assert_eq!(unit.name, "BucketApiBean");
        assert!(lists.is_empty());

        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].xml_tag, "ID");
        assert_eq!(attributes[0].kind, ValueKind::Identifier);

        let refs: Vec<_> = elements.iter().map(|e| (e.name.as_str(), e.type_ref.as_deref())).collect();
        assert_eq!(
            refs,
            vec![("Owner", Some("User")), ("Priority", None), ("Unknown", None)]
        );
        assert_eq!(elements[1].kind, ValueKind::Enum("Priority".into()));
        assert_eq!(elements[2].kind, ValueKind::Opaque("Gone".into()));
        assert!(elements[0].nullable);
        assert_eq!(elements[0].xml_tag, "Owner");
    }

    #[test]
    fn test_list_field_keeps_enclosing_tag_and_resolves_component() {
        let mut objects = Element::new("Objects", "array");
        objects.component_type = Some("com.spectralogic.s3.server.domain.User".into());
        objects.enclosing_tag = Some("Users".into());
        let mut priorities = Element::new("Priorities", "array");
        priorities.component_type = Some("com.spectralogic.s3.common.dao.domain.ds3.Priority".into());
        priorities.attribute = true;

        let contract = contract();
        let index = ContractIndex::new(&contract);
        let holder = type_def("Holder", vec![objects, priorities]);
        let unit = synthesize_type(&holder, TypeShape::TopLevel, &index);
        let (attributes, _, lists) = fields(&unit);

        assert!(attributes.is_empty());
        assert_eq!(lists[0].enclosing_tag.as_deref(), Some("Users"));
        assert_eq!(lists[0].type_ref.as_deref(), Some("User"));
        assert_eq!(lists[1].type_ref, None);
        assert_eq!(lists[1].component, ValueKind::Enum("Priority".into()));
        assert_eq!(lists[1].enclosing_tag, None);
    }

    #[test]
    fn test_enum_values_keep_contract_order() {
        let contract = contract();
        let index = ContractIndex::new(&contract);
        let unit = synthesize_type(&contract.types[1], TypeShape::Enum, &index);

        assert_eq!(unit.root_tag, None);
        match unit.body {
            TypeBody::Enum { values } => {
                let names: Vec<_> = values.iter().map(|v| v.name.as_str()).collect();
                assert_eq!(names, vec!["URGENT", "HIGH", "LOW"]);
            }
            TypeBody::Fields { .. } => panic!("expected an enum unit"),
        }
    }

    #[test]
    fn test_root_tag_rules() {
        let contract = Contract::default();
        let index = ContractIndex::new(&contract);
        let mut t = type_def("Job", vec![Element::new("Name", "java.lang.String")]);

        assert_eq!(
            synthesize_type(&t, TypeShape::TopLevel, &index).root_tag.as_deref(),
            Some("Data")
        );

        t.name_to_marshal = Some(String::new());
        assert_eq!(synthesize_type(&t, TypeShape::TopLevel, &index).root_tag, None);

        t.name_to_marshal = Some("Job".into());
        assert_eq!(
            synthesize_type(&t, TypeShape::TopLevel, &index).root_tag.as_deref(),
            Some("Job")
        );
    }
}
