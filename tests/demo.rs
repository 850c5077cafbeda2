use std::collections::HashSet;
use std::path::Path;
use storypager::build::build_site;
use storypager::config::Config;

fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::create_dir(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &dst.join(entry.file_name()))?;
        } else {
            std::fs::copy(entry.path(), dst.join(entry.file_name()))?;
        }
    }
    Ok(())
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_demo_project() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let project = dir.path().join("demo");
    copy_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("demo"), &project)?;

    let config = Config::from_directory(&project, None)?;
    build_site(&config)?;

    let out = project.join("ret");
    for (id, pages) in [("101", 3), ("102", 1), ("201", 1)].iter() {
        for n in 1..=*pages {
            let page = std::fs::read_to_string(out.join(id).join(format!("{}.html", n)))?;
            assert!(page.contains("<!-- bottom ad -->"));
            assert!(page.contains(&format!(
                r#"<link rel="canonical" href="https://example.org/3/{}/{}.html" />"#,
                id, n
            )));
        }
        assert!(!out.join(id).join(format!("{}.html", pages + 1)).exists());
    }

    let first = std::fs::read_to_string(out.join("101").join("1.html"))?;
    assert!(first.contains("<p>Some places reward the long way round.</p>"));
    assert!(first.contains("<!-- center ad -->"));
    assert!(first.contains(r#"<link rel="next" href="https://example.org/3/101/2.html" />"#));
    assert!(!first.contains(r#"rel="prev""#));

    let last = std::fs::read_to_string(out.join("101").join("3.html"))?;
    assert!(last.contains("<p>Plan accordingly.</p>"));
    assert!(!last.contains("<!-- center ad -->"));
    assert!(!last.contains(r#"rel="next""#));

    let list = read_json(&out.join("list.json"));
    let data = read_json(&out.join("data.json"));
    assert_eq!(list["category"], data["category"]);

    let ids: HashSet<&str> = list["all_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ["101", "102", "201"].iter().copied().collect::<HashSet<&str>>(),
        ids
    );
    assert_eq!(Some(3), data["data"]["BUZZ"]["items"][0]["count"].as_u64());
    assert_eq!(Some(1), data["data"]["SKIN-CARE"]["items"][0]["count"].as_u64());
    assert_eq!(
        "https://example.org/3/category.html?c=SKIN-CARE",
        data["category"][1]["index"]
    );
    Ok(())
}
