use serde::{Deserialize, Serialize};

#[derive(Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct VocabConfig {
    /// PostgREST base URL of the hosted store, e.g.
    /// `https://<project>.supabase.co/rest/v1`. Set via GLOSSA_VOCAB_URL.
    pub api_url: String,
    /// Project api key. Set via GLOSSA_VOCAB_KEY, never stored in profiles.
    pub api_key: String,
}
