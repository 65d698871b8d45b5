//! The `mockmate init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create mockmate.toml
    if std::path::Path::new("mockmate.toml").exists() {
        println!("mockmate.toml already exists, skipping.");
    } else {
        std::fs::write("mockmate.toml", SAMPLE_CONFIG)?;
        println!("Created mockmate.toml");
    }

    // Create starter question bank
    std::fs::create_dir_all("data")?;
    let bank_path = std::path::Path::new("data/questions.json");
    if bank_path.exists() {
        println!("data/questions.json already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_BANK)?;
        println!("Created data/questions.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit mockmate.toml with your API key");
    println!("  2. Run: mockmate validate-bank");
    println!("  3. Run: mockmate serve");

    Ok(())
}

// Top-level keys must come before the [providers.*] tables; anything after a
// table header belongs to that table and the loader would ignore it.
const SAMPLE_CONFIG: &str = r#"# mockmate configuration

default_provider = "gemini"
default_model = "gemini-1.5-pro"
session_length = 10
behavioral_questions = 5
bank_path = "data/questions.json"
sessions_path = "data/sessions.json"
port = 8000

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"
"#;

const SAMPLE_BANK: &str = r#"[
  {
    "id": "beh-001",
    "round": "behavioral",
    "text": "Tell me about a time you had a conflict with a teammate. How did you resolve it?",
    "difficulty": "medium",
    "tags": ["teamwork", "conflict"],
    "sample_good_points": [
      "names the stakeholders and the disagreement",
      "describes a concrete resolution step",
      "reflects on what changed afterwards"
    ]
  },
  {
    "id": "beh-002",
    "round": "behavioral",
    "text": "Describe a project you are proud of. What was your specific contribution?",
    "difficulty": "easy",
    "tags": ["ownership"],
    "sample_good_points": [
      "separates personal contribution from team effort",
      "quantifies the impact"
    ]
  },
  {
    "id": "beh-003",
    "round": "behavioral",
    "text": "Tell me about a time you missed a deadline. What happened and what did you learn?",
    "difficulty": "medium",
    "tags": ["failure", "learning"],
    "sample_good_points": [
      "owns the miss without deflecting",
      "names a concrete process change"
    ]
  },
  {
    "id": "beh-004",
    "round": "behavioral",
    "text": "Describe a situation where you received difficult feedback. How did you respond?",
    "difficulty": "medium",
    "tags": ["feedback"],
    "sample_good_points": [
      "specific feedback, not generic praise",
      "shows behavior change over time"
    ]
  },
  {
    "id": "beh-005",
    "round": "behavioral",
    "text": "Tell me about a time you had to learn something quickly to unblock your team.",
    "difficulty": "easy",
    "tags": ["learning"],
    "sample_good_points": [
      "names the resource or strategy used to learn",
      "ties the learning to the team outcome"
    ]
  },
  {
    "id": "dsa-001",
    "round": "dsa-fundamentals",
    "text": "Explain how a hash map works and when lookups degrade from O(1).",
    "difficulty": "easy",
    "tags": ["hashing", "data-structures"],
    "sample_good_points": [
      "buckets and hash function",
      "collisions and their resolution",
      "load factor and resizing"
    ]
  },
  {
    "id": "dsa-002",
    "round": "dsa-fundamentals",
    "text": "Compare BFS and DFS. When would you choose one over the other?",
    "difficulty": "medium",
    "tags": ["graphs"],
    "sample_good_points": [
      "queue vs stack framing",
      "shortest path in unweighted graphs",
      "memory trade-offs"
    ]
  },
  {
    "id": "dsa-003",
    "round": "dsa-fundamentals",
    "text": "What is the difference between a process and a thread?",
    "difficulty": "easy",
    "tags": ["os"],
    "sample_good_points": [
      "address-space isolation",
      "scheduling and context-switch cost",
      "shared memory hazards"
    ]
  },
  {
    "id": "dsa-004",
    "round": "dsa-fundamentals",
    "text": "Explain binary search and its preconditions. What is its complexity?",
    "difficulty": "easy",
    "tags": ["algorithms"],
    "sample_good_points": [
      "sorted input precondition",
      "O(log n) with a short argument",
      "off-by-one pitfalls"
    ]
  },
  {
    "id": "dsa-005",
    "round": "dsa-fundamentals",
    "text": "How does an index speed up a database query, and what does it cost?",
    "difficulty": "medium",
    "tags": ["databases"],
    "sample_good_points": [
      "tree or hash structure over the keys",
      "write amplification and storage cost",
      "selectivity considerations"
    ]
  }
]
"#;
