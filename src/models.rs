// src/models.rs

pub mod access;
pub mod area;
pub mod auth;
pub mod history;
pub mod permission;
pub mod recommendation;
pub mod user;
pub mod visit;
pub mod visitor;

/// Enums de texto da API (gerados por `wire_enum!`).
pub trait WireEnum: From<String> + Sized {
    fn wire_values() -> Vec<&'static str>;
    fn is_known(&self) -> bool;
}

// Enums que trafegam como texto na API. O servidor guarda strings livres,
// então qualquer valor fora da lista conhecida cai em `Outro(String)` e é exibido como veio.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Outro(String),
        }

        impl $name {
            /// Valor enviado para a API.
            pub fn wire(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Outro(value) => value,
                }
            }

            /// Rótulo exibido nas tabelas.
            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Outro(value) => value,
                }
            }

            pub fn known() -> Vec<Self> {
                vec![$($name::$variant),+]
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Outro(_))
            }

            /// Valor conhecido ou o padrão do formulário.
            pub fn or_default(&self) -> Self {
                if self.is_known() { self.clone() } else { Self::default() }
            }
        }

        impl $crate::models::WireEnum for $name {
            fn wire_values() -> Vec<&'static str> {
                vec![$($wire),+]
            }

            fn is_known(&self) -> bool {
                $name::is_known(self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                let normalized = value.trim().to_uppercase();
                $(
                    if normalized == $wire {
                        return $name::$variant;
                    }
                )+
                $name::Outro(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.wire().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub(crate) use wire_enum;
