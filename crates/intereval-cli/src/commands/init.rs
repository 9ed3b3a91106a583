//! The `intereval init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("intereval.toml").exists() {
        println!("intereval.toml already exists, skipping.");
    } else {
        std::fs::write("intereval.toml", SAMPLE_CONFIG)?;
        println!("Created intereval.toml");
    }

    std::fs::create_dir_all("answer-sets")?;
    let example_path = std::path::Path::new("answer-sets/example.toml");
    if example_path.exists() {
        println!("answer-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ANSWER_SET)?;
        println!("Created answer-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Optionally point vectors_path in intereval.toml at a GloVe file");
    println!("  2. Run: intereval validate --answer-set answer-sets/example.toml");
    println!("  3. Run: intereval batch --answer-set answer-sets/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# intereval configuration

# "auto" uses the enriched backend when it can be built, "basic" forces
# the lexical fallback.
backend = "auto"

# Word vectors in GloVe text format enable semantic similarity.
# vectors_path = "${HOME}/data/glove.6B.50d.txt"

# Replace any built-in word list.
# lexicon_path = "lexicon.toml"

parallelism = 4
output_dir = "./intereval-results"

[weights]
clarity = 0.25
accuracy = 0.30
communication = 0.25
confidence = 0.20
"#;

const EXAMPLE_ANSWER_SET: &str = r#"[answer_set]
id = "example"
name = "Example Answer Set"
description = "A few answers of varying quality to get started"

[[cases]]
id = "rest_api_strong"
question = "Describe a REST API you implemented and deployed, focusing on performance optimization."
domain = "it"
difficulty = "hard"
type = "technical"
keywords = ["API", "caching", "latency"]
answer = """
I implemented a REST API using Python and deployed it on AWS. \
For example, I reduced latency by 40% through caching.
"""
tags = ["technical", "strong"]

[[cases]]
id = "rest_api_weak"
question = "Describe a REST API you implemented and deployed, focusing on performance optimization."
domain = "it"
difficulty = "hard"
type = "technical"
keywords = ["API"]
answer = "maybe idk"
tags = ["technical", "weak"]

[[cases]]
id = "conflict"
question = "Tell me about a time you resolved a conflict within your team."
domain = "hr"
type = "behavioral"
answer = """
In my previous role two engineers disagreed about the release plan. \
First, I listened to both of them separately. Then we discussed the \
trade-offs together and agreed on a phased rollout, and I communicated \
the decision clearly to the stakeholders.
"""
tags = ["behavioral"]
"#;
