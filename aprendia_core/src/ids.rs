use std::str::FromStr;


macro_rules! create_numeric_id_newtype {
    ($struct_name:ident) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $struct_name(pub(crate) u64);

        impl $struct_name {
            #[inline]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl std::str::FromStr for $struct_name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let inner_id = <u64 as std::str::FromStr>::from_str(s.trim())?;

                Ok(Self(inner_id))
            }
        }

        impl $crate::ids::AprendiaIdNewtype for $struct_name {}

        impl std::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}


/// Marker for all numeric id newtypes the backend hands out.
pub trait AprendiaIdNewtype: FromStr {}



create_numeric_id_newtype!(StoryId);

create_numeric_id_newtype!(StudiableId);

create_numeric_id_newtype!(SentenceId);



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let studiable_id = StudiableId::new(42);

        assert_eq!(serde_json::to_string(&studiable_id).unwrap(), "42");
        assert_eq!(
            serde_json::from_str::<StudiableId>("42").unwrap(),
            studiable_id
        );
    }

    #[test]
    fn ids_parse_from_command_line_strings() {
        assert_eq!(" 7 ".parse::<StoryId>().unwrap(), StoryId::new(7));
        assert!("seven".parse::<StoryId>().is_err());
        assert!("-1".parse::<StoryId>().is_err());
    }
}
