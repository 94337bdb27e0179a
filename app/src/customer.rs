use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Phone,
    Address,
}

impl CustomerDetails {
    pub fn new<N: Into<String>, P: Into<String>, A: Into<String>>(
        name: N,
        phone: P,
        address: A,
    ) -> Self {
        CustomerDetails {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
        }
    }

    pub fn set<S: Into<String>>(&mut self, field: Field, value: S) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Phone => self.phone = value,
            Field::Address => self.address = value,
        }
    }

    /// Required fields that are empty or only whitespace, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|&f| self.get(f).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn reset(&mut self) {
        *self = CustomerDetails::default();
    }
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Phone, Field::Address];
}

impl fmt::Display for Field {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Address => "address",
        };
        fmt.write_str(label)
    }
}
