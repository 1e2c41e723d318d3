use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use dlsenc_core::labels::CAST;

use super::{TemplateData, TemplateError, TemplateTrack, render_html};
use crate::extract::LayoutKind;

/// Interactively collect page values and write `<html_dir>/<name>.html`.
///
/// Prompts go to `output`, answers are read line by line from `input`; an
/// exhausted input answers every remaining question with an empty line.
/// The layout follows the entered file name the same way extraction
/// dispatches on item keys. Returns the path of the written page.
pub fn run_wizard<R, W>(
    input: &mut R, output: &mut W, html_dir: &Path, image_dir: &Path,
) -> Result<PathBuf, TemplateError>
where
    R: BufRead,
    W: Write,
{
    let mut prompt = Prompt { input, output };

    let name = prompt.ask("HTMLファイル名を入力してください（.htmlは自動で付加されます）: ")?;
    if name.is_empty() {
        return Err(TemplateError::MissingName);
    }
    let layout = LayoutKind::for_identifier(&name);

    let album_title = prompt.ask("アルバムタイトルを入力してください: ")?;
    let brand_name = prompt.ask("サークル名を入力してください: ")?;

    let mut details = BTreeMap::new();
    let cast = prompt.ask(&format!("{CAST}を入力してください: "))?;
    if !cast.is_empty() {
        details.insert(CAST.to_string(), cast);
    }

    while prompt.confirm("詳細情報を追加しますか？ (y/n): ")? {
        let label = prompt.ask("項目名を入力してください: ")?;
        let value = prompt.ask("値を入力してください: ")?;
        if label.is_empty() {
            continue;
        }
        details.insert(label, value);
    }

    let mut tracks = Vec::new();
    if layout == LayoutKind::Rj {
        while prompt.confirm("トラックを追加しますか？ (y/n): ")? {
            let title = prompt.ask("トラックタイトルを入力してください: ")?;
            let duration = prompt.ask("再生時間を入力してください (例: 4:30): ")?;
            tracks.push(TemplateTrack { title, duration });
        }
    }

    let html = render_html(&TemplateData { album_title, brand_name, details, tracks, layout });

    let path = html_dir.join(format!("{name}.html"));
    if path.exists() && !prompt.confirm("同名のファイルが既に存在します。上書きしますか？ (y/n): ")? {
        return Err(TemplateError::Declined(path.display().to_string()));
    }

    fs::create_dir_all(html_dir)?;
    fs::write(&path, html)?;
    tracing::info!(path = %path.display(), layout = ?layout, "wrote product page");

    let output = prompt.output;
    writeln!(output, "HTMLファイルを保存しました: {}", path.display())?;
    writeln!(output)?;
    writeln!(output, "【メイン画像について】")?;
    writeln!(output, "メイン画像を設定する場合は、以下の場所に画像ファイルを配置してください：")?;
    writeln!(output, "  配置ディレクトリ: {}", image_dir.join(&name).display())?;
    writeln!(output, "  ファイル名: {name}_img_main.webp または {name}_img_main.jpg")?;
    writeln!(output, "  (webp形式が優先されます)")?;

    Ok(path)
}

struct Prompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompt<'_, R, W> {
    fn ask(&mut self, question: &str) -> Result<String, TemplateError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn confirm(&mut self, question: &str) -> Result<bool, TemplateError> {
        Ok(self.ask(question)?.eq_ignore_ascii_case("y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_record;
    use std::io::Cursor;

    fn run(answers: &str, html_dir: &Path) -> (Result<PathBuf, TemplateError>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = run_wizard(&mut input, &mut output, html_dir, Path::new("/images"));
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_wizard_rj_page() {
        let temp = tempfile::tempdir().unwrap();
        let answers = "RJ000001\nテストアルバム\nテストサークル\n声優A\n\
                       y\n販売日\n2024年01月01日\nn\n\
                       y\nトラック1\n4:30\nY\nトラック2\n1:05\nn\n";

        let (result, output) = run(answers, temp.path());
        let path = result.unwrap();
        assert_eq!(path, temp.path().join("RJ000001.html"));
        assert!(output.contains("HTMLファイルを保存しました"));
        assert!(output.contains("RJ000001_img_main.webp"));

        let record = extract_record(&fs::read_to_string(&path).unwrap(), "RJ000001").unwrap();
        assert_eq!(record.album_title, "テストアルバム");
        assert_eq!(record.brand, "テストサークル");
        assert_eq!(record.actor, "声優A");
        assert_eq!(record.track_list.len(), 2);
        assert_eq!(record.track_list[0].track_duration, "4分30秒");
        assert_eq!(record.additional.get("販売日").map(String::as_str), Some("2024年01月01日"));
    }

    #[test]
    fn test_wizard_d_page_skips_tracks() {
        let temp = tempfile::tempdir().unwrap();
        let answers = "d_123456\nDアルバム\nDサークル\n声優B\nn\n";

        let (result, output) = run(answers, temp.path());
        let path = result.unwrap();
        assert!(!output.contains("トラックを追加しますか"));

        let record = extract_record(&fs::read_to_string(&path).unwrap(), "d_123456").unwrap();
        assert_eq!(record.album_title, "Dアルバム");
        assert_eq!(record.brand, "Dサークル");
        assert_eq!(record.actor, "声優B");
        assert!(record.track_list.is_empty());
    }

    #[test]
    fn test_wizard_requires_name() {
        let temp = tempfile::tempdir().unwrap();
        let (result, _) = run("\n", temp.path());
        assert!(matches!(result, Err(TemplateError::MissingName)));
    }

    #[test]
    fn test_wizard_declined_overwrite_keeps_file() {
        let temp = tempfile::tempdir().unwrap();
        let existing = temp.path().join("RJ000001.html");
        fs::write(&existing, "original").unwrap();

        let (result, _) = run("RJ000001\nt\nb\n\nn\nn\nn\n", temp.path());
        assert!(matches!(result, Err(TemplateError::Declined(_))));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "original");
    }

    #[test]
    fn test_wizard_confirmed_overwrite() {
        let temp = tempfile::tempdir().unwrap();
        let existing = temp.path().join("RJ000001.html");
        fs::write(&existing, "original").unwrap();

        let (result, _) = run("RJ000001\n新タイトル\nb\n\nn\nn\ny\n", temp.path());
        assert_eq!(result.unwrap(), existing);
        assert!(fs::read_to_string(&existing).unwrap().contains("新タイトル"));
    }

    #[test]
    fn test_wizard_eof_answers_no() {
        let temp = tempfile::tempdir().unwrap();
        let (result, _) = run("RJ000002\nタイトル", temp.path());
        let path = result.unwrap();
        let record = extract_record(&fs::read_to_string(&path).unwrap(), "RJ000002").unwrap();
        assert_eq!(record.album_title, "タイトル");
        assert_eq!(record.actor, "");
    }
}
