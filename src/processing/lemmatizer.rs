//! Rule-based, part-of-speech aware lemmatization

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Guess the role of an isolated lowercase word from its suffix.
    /// Ambiguous words fall back to `Noun`.
    pub fn guess(word: &str) -> Self {
        let len = word.chars().count();

        if len > 4 && word.ends_with("ly") {
            return PartOfSpeech::Adverb;
        }
        if len > 4 && (word.ends_with("ing") || word.ends_with("ed")) {
            return PartOfSpeech::Verb;
        }
        const ADJECTIVE_SUFFIXES: [&str; 9] =
            ["ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish"];
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return PartOfSpeech::Adjective;
        }

        PartOfSpeech::Noun
    }
}

pub struct Lemmatizer {
    irregular: HashMap<(&'static str, PartOfSpeech), &'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        use PartOfSpeech::*;

        let nouns = [
            ("children", "child"), ("men", "man"), ("women", "woman"), ("feet", "foot"),
            ("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"), ("analyses", "analysis"),
            ("criteria", "criterion"), ("phenomena", "phenomenon"), ("indices", "index"),
            ("matrices", "matrix"), ("theses", "thesis"), ("hypotheses", "hypothesis"),
        ];
        // Past forms are guessed as nouns unless they end in -ed, so they are
        // registered under both roles
        let verbs = [
            ("ran", "run"), ("began", "begin"), ("begun", "begin"), ("built", "build"),
            ("led", "lead"), ("wrote", "write"), ("written", "write"), ("made", "make"),
            ("taught", "teach"), ("thought", "think"), ("brought", "bring"), ("knew", "know"),
            ("known", "know"), ("grew", "grow"), ("grown", "grow"), ("drove", "drive"),
            ("driven", "drive"), ("saw", "see"), ("seen", "see"), ("went", "go"),
            ("gone", "go"), ("took", "take"), ("taken", "take"), ("gave", "give"),
            ("given", "give"), ("got", "get"), ("held", "hold"), ("spent", "spend"),
            ("sold", "sell"), ("told", "tell"), ("kept", "keep"), ("met", "meet"),
            ("paid", "pay"), ("felt", "feel"), ("chose", "choose"), ("chosen", "choose"),
            ("shipped", "ship"), ("understood", "understand"),
        ];
        let adjectives = [
            ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
        ];

        let mut irregular = HashMap::new();
        for (form, lemma) in nouns {
            irregular.insert((form, Noun), lemma);
        }
        for (form, lemma) in verbs {
            irregular.insert((form, Verb), lemma);
            irregular.insert((form, Noun), lemma);
        }
        for (form, lemma) in adjectives {
            irregular.insert((form, Adjective), lemma);
            irregular.insert((form, Noun), lemma);
        }

        Self { irregular }
    }

    /// Lemmatize with a guessed part of speech
    pub fn lemmatize(&self, word: &str) -> String {
        self.lemmatize_as(word, PartOfSpeech::guess(word))
    }

    pub fn lemmatize_as(&self, word: &str, pos: PartOfSpeech) -> String {
        if let Some(lemma) = self.irregular.get(&(word, pos)) {
            return (*lemma).to_string();
        }

        let candidate = match pos {
            PartOfSpeech::Noun => Self::singularize(word),
            PartOfSpeech::Verb => Self::verb_base(word),
            PartOfSpeech::Adjective | PartOfSpeech::Adverb => None,
        };

        match candidate {
            Some(lemma) if lemma.chars().count() >= 3 => lemma,
            _ => word.to_string(),
        }
    }

    fn singularize(word: &str) -> Option<String> {
        if word.chars().count() <= 3
            || word.ends_with("ss")
            || word.ends_with("us")
            || word.ends_with("is")
        {
            return None;
        }

        if let Some(stem) = word.strip_suffix("ies") {
            return Some(format!("{}y", stem));
        }
        if word.ends_with("sses") {
            return word.strip_suffix("es").map(str::to_string);
        }
        for suffix in ["ches", "shes", "xes", "zes"] {
            if word.ends_with(suffix) {
                return word.strip_suffix("es").map(str::to_string);
            }
        }
        word.strip_suffix('s').map(str::to_string)
    }

    fn verb_base(word: &str) -> Option<String> {
        if let Some(stem) = word.strip_suffix("ied") {
            return Some(format!("{}y", stem));
        }

        if word.ends_with("eed") {
            return None;
        }

        let stem = word
            .strip_suffix("ing")
            .or_else(|| word.strip_suffix("ed"))?;

        // bring, string: no vowel left means the suffix was part of the root
        if !stem.chars().any(|c| is_vowel(c) || c == 'y') {
            return None;
        }

        Some(Self::restore_stem(stem))
    }

    /// Undo consonant doubling and silent-e dropping left by -ing/-ed
    fn restore_stem(stem: &str) -> String {
        let chars: Vec<char> = stem.chars().collect();
        let n = chars.len();
        if n < 2 {
            return stem.to_string();
        }

        let last = chars[n - 1];
        let prev = chars[n - 2];

        if last == prev && !matches!(last, 'l' | 's' | 'z' | 'e') && !is_vowel(last) {
            return chars[..n - 1].iter().collect();
        }

        if last == 'v' || stem.ends_with("iz") || stem.ends_with("yz") {
            return format!("{}e", stem);
        }

        // consonant-vowel-consonant endings on short stems: cod(ing) -> code
        if n <= 5
            && matches!(last, 'c' | 'g' | 'd' | 'k' | 't' | 's' | 'r')
            && is_vowel(prev)
            && (n < 3 || !is_vowel(chars[n - 3]))
        {
            return format!("{}e", stem);
        }

        stem.to_string()
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_guess() {
        assert_eq!(PartOfSpeech::guess("quickly"), PartOfSpeech::Adverb);
        assert_eq!(PartOfSpeech::guess("developing"), PartOfSpeech::Verb);
        assert_eq!(PartOfSpeech::guess("analytical"), PartOfSpeech::Adjective);
        assert_eq!(PartOfSpeech::guess("python"), PartOfSpeech::Noun);
    }

    #[test]
    fn test_noun_plurals() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("models"), "model");
        assert_eq!(lemmatizer.lemmatize("libraries"), "library");
        assert_eq!(lemmatizer.lemmatize("batches"), "batch");
        assert_eq!(lemmatizer.lemmatize("children"), "child");
        assert_eq!(lemmatizer.lemmatize("analysis"), "analysis");
        assert_eq!(lemmatizer.lemmatize("business"), "business");
    }

    #[test]
    fn test_verb_forms() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("developing"), "develop");
        assert_eq!(lemmatizer.lemmatize("running"), "run");
        assert_eq!(lemmatizer.lemmatize("managed"), "manage");
        assert_eq!(lemmatizer.lemmatize("coding"), "code");
        assert_eq!(lemmatizer.lemmatize("applied"), "apply");
        assert_eq!(lemmatizer.lemmatize("solving"), "solve");
        assert_eq!(lemmatizer.lemmatize("led"), "lead");
    }

    #[test]
    fn test_suffix_inside_root_kept() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("string"), "string");
        assert_eq!(lemmatizer.lemmatize("speed"), "speed");
        assert_eq!(lemmatizer.lemmatize("class"), "class");
    }

    #[test]
    fn test_adjectives_and_adverbs_kept() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("analytical"), "analytical");
        assert_eq!(lemmatizer.lemmatize("quickly"), "quickly");
        assert_eq!(lemmatizer.lemmatize_as("better", PartOfSpeech::Adjective), "good");
    }
}
