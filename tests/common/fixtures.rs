//! Static documents and templates used across harnesses.

use fieldcast::{field, Template};

/// Phone numbers in assorted human formats, all for subscriber 9024455222.
pub const PHONES_9024455222: &[&str] = &[
    "8902-445-52-22",
    "8 (902) 445 52 22",
    "+7(902)44-55-222",
    "+7 902 445-52-22",
    "79024455222",
];

/// Strings that must not normalise as phones.
pub const NOT_PHONES: &[&str] = &[
    // City number, no mobile subscriber.
    "2 44 55 22",
    // Two subscribers in one field.
    "+7 902 445 52 22, +7 924 444 44 42",
    "",
    "call me",
];

/// A post with one field of every kind.
pub const POST_DOCUMENT: &str = r#"
{
    "int": "10", "float": "10.05", "str": "string", "phone": "+7 999 55 44 11 1",
    "description": ["2021-01-01 12:00:05", "2021.03.05 5pm"],
    "array": ["0.05", "0.01", "1.2", "11.0"]
}
"#;

/// Template matching [`POST_DOCUMENT`].
pub fn post_template() -> Template {
    Template::new()
        .field("int", field::int())
        .field("float", field::float())
        .field("str", field::str())
        .field("phone", field::phone())
        .field("description", field::str())
        .field("array", field::array(field::float()))
}

/// Textual form of [`post_template`].
pub const POST_TEMPLATE_TEXT: &str = r#"
{
    "int": "int",
    "float": "float",
    "str": "str",
    "phone": "phone",
    "description": null,
    "array": "array<float>"
}
"#;

/// An order with nested structs and an array of structs.
pub const ORDER_DOCUMENT: &str = r#"
{
    "id": "1001",
    "customer": {"name": "Ivan", "phone": "8 (950) 288-56-23"},
    "items": [
        {"sku": "A-1", "qty": "2", "price": "9.99"},
        {"sku": "B-7", "qty": 1, "price": 120}
    ],
    "tags": "[gift, express]"
}
"#;

/// Template matching [`ORDER_DOCUMENT`].
pub fn order_template() -> Template {
    let item = Template::new()
        .field("sku", field::str())
        .field("qty", field::int())
        .field("price", field::float());
    Template::new()
        .field("id", field::int())
        .field(
            "customer",
            field::structure(
                Template::new()
                    .field("name", field::str())
                    .field("phone", field::phone()),
            ),
        )
        .field("items", field::array(field::structure(item)))
        .field("tags", field::array(field::str()))
}
