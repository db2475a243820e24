//! Constants shared between the MeCab command line and the output parser.

/// Separator between the fields of one node in MeCab output.
pub const COMPONENT_SEPARATOR: &str = "<ajt__component_separator>";
/// Separator between nodes in MeCab output.
pub const NODE_SEPARATOR: &str = "<ajt__node_separator>";
/// Marker printed by MeCab at the end of a sentence.
pub const FOOTER: &str = "<ajt__footer>";

/// Node-format directive for the surface form.
pub const FORMAT_WORD: &str = "%m";
/// Node-format directive for the dictionary form (IPADIC feature 6).
pub const FORMAT_HEADWORD: &str = "%f[6]";
/// Node-format directive for the katakana reading (IPADIC feature 7).
pub const FORMAT_KATAKANA_READING: &str = "%f[7]";
/// Node-format directive for the part of speech (IPADIC feature 0).
pub const FORMAT_PART_OF_SPEECH: &str = "%f[0]";
/// Node-format directive for the conjugation form (IPADIC feature 5).
pub const FORMAT_INFLECTION: &str = "%f[5]";

/// Number of fields in a node produced for a known word.
pub const NODE_FIELD_COUNT: usize = 5;

/// Value passed to `--input-buffer-size`.
pub const INPUT_BUFFER_SIZE: usize = 819_200;
/// Default time limit for one MeCab request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Characters whose readings are not annotated when number skipping is on.
pub const NUMBERS: &str = "一二三四五六七八九十０１２３４５６７８９";

/// Environment variable holding an explicit MeCab executable path.
pub const ENV_MECAB_PATH: &str = "MECAB_PATH";
/// Environment variable holding an explicit dictionary directory.
pub const ENV_MECAB_DIC_DIR: &str = "MECAB_DIC_DIR";
/// Environment variable holding the support directory with bundled files.
pub const ENV_SUPPORT_DIR: &str = "FURIGANA_SUPPORT_DIR";

pub(crate) const RC_FILE_NAME: &str = "mecabrc";
pub(crate) const USER_DIC_FILE_NAME: &str = "user_dic.dic";
