//! Driver binary. Grounded on `original_source/main.cpp`'s sentence loop
//! (tokenize, parse each word, run the chart, print) and the teacher's
//! `main.rs` shape (reads a path from argv, reports load errors to
//! stderr without panicking). Non-goals: no `generate`/`correct` modes.

use grammatical::lexicon::Lexicon;
use grammatical::tokenizer::Tokenizer;
use grammatical::{parse_sentence, SentenceResult};
use std::env;
use std::fs;
use std::process;

fn main() {
  let mut args = env::args().skip(1);
  let words_path = args.next().unwrap_or_else(|| "words.txt".to_string());
  let sentences_path = args.next();

  let mut lexicon = Lexicon::new();
  match lexicon.load_file(std::path::Path::new(&words_path)) {
    Ok(errors) => {
      for error in &errors {
        eprintln!("{}", error);
      }
    }
    Err(error) => {
      eprintln!("failed to load lexicon: {}", error);
      process::exit(1);
    }
  }

  let input = match sentences_path {
    Some(path) => fs::read_to_string(&path).unwrap_or_else(|error| {
      eprintln!("failed to read '{}': {}", path, error);
      process::exit(1);
    }),
    None => {
      let mut buffer = String::new();
      use std::io::Read;
      std::io::stdin().read_to_string(&mut buffer).unwrap_or_else(|error| {
        eprintln!("failed to read stdin: {}", error);
        process::exit(1);
      });
      buffer
    }
  };

  let mut tokens = Tokenizer::new(&input).peekable();
  let mut sentence_index = 0;
  while let Some(result) = parse_sentence(&lexicon, &mut tokens) {
    sentence_index += 1;
    match result {
      SentenceResult::Parses(parses) => {
        for parse in &parses {
          println!("{}: {}", sentence_index, parse);
          print_errors(parse);
        }
      }
      SentenceResult::Partial(phrases) => {
        let rendered: Vec<String> = phrases.iter().map(|p| p.to_string()).collect();
        println!("{}: {}", sentence_index, rendered.join(" "));
        for phrase in &phrases {
          print_errors(phrase);
        }
      }
    }
  }
}

/// Prints every diagnostic attached anywhere in `phrase`'s tree, spec
/// Section 3's "errors are local to each node" rendered as a flat list
/// the way `original_source/main.cpp` does (`"  * {error}"` per line).
fn print_errors(phrase: &grammatical::phrase::Phrase) {
  use grammatical::phrase::Variant;
  match &phrase.variant {
    Variant::LeftBranch { head, mod_phrase, .. } | Variant::RightBranch { head, mod_phrase, .. } => {
      print_errors(head);
      print_errors(mod_phrase);
    }
    Variant::Word { morpheme, .. } => print_errors(morpheme),
    Variant::Morpheme { .. } => {}
  }
  for error in &phrase.errors {
    println!("  * {}", error);
  }
}
