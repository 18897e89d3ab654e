use assessment_docgen::models::{load_all_banks, load_toml_to_batch};
use assessment_docgen::services::text_renderer;
use assessment_docgen::{App, Config, Difficulty, DocxRenderer, QuestionBatch, QuestionRecord};
use std::collections::BTreeMap;
use std::path::Path;

fn record(order: u32, options: &[&str], answer: &str) -> QuestionRecord {
    QuestionRecord {
        title: format!("Question {}", order),
        description: "An end-to-end test question.".to_string(),
        question: "Which option is correct?".to_string(),
        instruction: "Select the correct option.".to_string(),
        difficulty: Difficulty::Easy,
        order,
        options: options.iter().map(|s| s.to_string()).collect(),
        answer: answer.to_string(),
        explanation: "By construction.".to_string(),
        subject: "Quantitative Math".to_string(),
        unit: "Algebra".to_string(),
        topic: "Interpreting Variables".to_string(),
        diagram: None,
        option_diagrams: BTreeMap::new(),
        table_rows: None,
    }
}

#[test]
fn test_two_record_batch_marks_both_answers() {
    let records = vec![record(1, &["0", "1"], "0"), record(2, &["A", "B", "C"], "C")];

    let output = text_renderer::render_batch(&records);

    let marked: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with("@@option "))
        .collect();
    assert_eq!(marked, vec!["@@option 0", "@@option C"]);
}

#[tokio::test]
async fn test_shipped_banks_load_and_validate() {
    let banks = load_all_banks("question_banks")
        .await
        .expect("加载题库失败");

    assert_eq!(banks.len(), 2);

    let total: usize = banks.iter().map(|b| b.questions.len()).sum();
    assert_eq!(total, 27);

    // 文件名排序：assessment_25 在 new_questions 之前
    assert_eq!(banks[0].name, "assessment_25");
    assert_eq!(banks[1].name, "new_questions");
}

#[tokio::test]
async fn test_assessment_bank_renders_one_marked_option_per_question() {
    let batch = load_toml_to_batch(Path::new("question_banks/assessment_25.toml"))
        .await
        .expect("加载题库失败");

    let output = text_renderer::render_batch(&batch.questions);

    let marked = output
        .lines()
        .filter(|line| line.starts_with("@@option "))
        .count();
    assert_eq!(marked, batch.questions.len());

    // 重复渲染逐字节一致
    assert_eq!(output, text_renderer::render_batch(&batch.questions));
}

#[tokio::test]
async fn test_docx_artifact_written_without_network() {
    let tmp = std::env::temp_dir().join("assessment_docgen_generation_test");
    let config = Config {
        output_dir: tmp.to_string_lossy().to_string(),
        images_dir: tmp.join("images").to_string_lossy().to_string(),
        ..Config::default()
    };
    std::fs::create_dir_all(&config.output_dir).expect("创建输出目录失败");

    let batch = QuestionBatch {
        name: "two_records".to_string(),
        questions: vec![record(1, &["0", "1"], "0"), record(2, &["A", "B", "C"], "C")],
    };

    let renderer = DocxRenderer::new(&config);
    let path = tmp.join("two_records.docx");
    renderer
        .render_to_file(&batch, &path)
        .await
        .expect("渲染文档失败");

    let bytes = std::fs::read(&path).expect("读取文档失败");
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
#[ignore] // 会尝试下载远程图片，需要外网：cargo test -- --ignored
async fn test_full_generation_run() {
    let tmp = std::env::temp_dir().join("assessment_docgen_full_run");
    let config = Config {
        output_dir: tmp.to_string_lossy().to_string(),
        images_dir: tmp.join("images").to_string_lossy().to_string(),
        ..Config::default()
    };

    let app = App::initialize(config.clone()).expect("初始化失败");
    app.run().await.expect("生成运行失败");

    for name in ["assessment_25.txt", "assessment_25.docx", "new_questions.txt", "new_questions.docx"] {
        let path = Path::new(&config.output_dir).join(name);
        assert!(path.exists(), "缺少产物: {}", path.display());
    }
}
