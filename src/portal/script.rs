//! ページ上で評価するJavaScript
//!
//! 値は serde_json で文字列リテラル化して埋め込む。

/// JS文字列リテラル
fn lit(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// セレクトボックスの結果
pub const SELECT_OK: &str = "ok";
pub const SELECT_MISSING: &str = "missing";
pub const SELECT_NO_OPTION: &str = "no-option";

/// `select[name=...]` の値を設定して change イベントを発火する
pub fn select_option(select_name: &str, value: &str) -> String {
    let selector = format!("select[name='{}']", select_name);
    format!(
        r#"
        (function() {{
            var el = document.querySelector({selector});
            if (!el) {{
                return {missing};
            }}
            var value = {value};
            var found = Array.prototype.some.call(el.options, function(o) {{
                return o.value === value;
            }});
            if (!found) {{
                return {no_option};
            }}
            el.value = value;
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return {ok};
        }})()
        "#,
        selector = lit(&selector),
        value = lit(value),
        missing = lit(SELECT_MISSING),
        no_option = lit(SELECT_NO_OPTION),
        ok = lit(SELECT_OK),
    )
}

/// 要素が存在するか
pub fn element_exists(selector: &str) -> String {
    format!("document.querySelector({}) !== null", lit(selector))
}

/// テキストに `marker` を含むリンクがあるか
pub fn link_text_contains(marker: &str) -> String {
    format!(
        r#"
        (function() {{
            var marker = {marker};
            var links = document.querySelectorAll('a');
            for (var i = 0; i < links.length; i++) {{
                if ((links[i].textContent || '').indexOf(marker) >= 0) {{
                    return true;
                }}
            }}
            return false;
        }})()
        "#,
        marker = lit(marker),
    )
}

/// 行数が `min` を超えたか
pub fn row_count_exceeds(selector: &str, min: usize) -> String {
    format!(
        "document.querySelectorAll({}).length > {}",
        lit(selector),
        min
    )
}

/// 解決済み href の一覧をJSON文字列で返す
pub fn link_hrefs(selector: &str) -> String {
    format!(
        r#"
        (function() {{
            var hrefs = [];
            var links = document.querySelectorAll({selector});
            for (var i = 0; i < links.length; i++) {{
                if (links[i].href) {{
                    hrefs.push(links[i].href);
                }}
            }}
            return JSON.stringify(hrefs);
        }})()
        "#,
        selector = lit(selector),
    )
}

/// `link_hrefs` の結果を解釈する
pub fn parse_hrefs(json: &str) -> Result<Vec<String>, serde_json::Error> {
    let hrefs: Vec<String> = serde_json::from_str(json)?;
    Ok(hrefs
        .into_iter()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect())
}
