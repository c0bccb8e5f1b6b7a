//! Page acquisition: browser capture, HTTP fetch and saved-page reading.

use super::extraction::{needs_urljoin, write_extract_page};
use super::literals::{py_list, py_str};
use super::output::{output_import, write_output};
use super::writer::ScriptWriter;
use crate::config::{BrowserEngine, ScriptRequest, SourceOrigin};

/// Comment emitted when a static script is asked to click through pages.
pub const STATIC_CLICK_NOTICE: &str =
    "Button pagination needs an interactive browser; only the start page is fetched.";

/// Per-request HTTP timeout in seconds.
const FETCH_TIMEOUT_SECS: u32 = 30;

fn write_imports(w: &mut ScriptWriter, mut std_modules: Vec<&str>, third_party: &[&str]) {
    std_modules.sort_unstable();
    std_modules.dedup();
    for module in std_modules {
        w.line(format!("import {module}"));
    }
    for line in third_party {
        w.line(*line);
    }
    w.blank();
}

fn write_project_constants(w: &mut ScriptWriter, request: &ScriptRequest) {
    w.line(format!("PROJECT_FOLDER = {}", py_str(request.project.folder.trim())));
    w.line("PAGES_FOLDER = os.path.join(PROJECT_FOLDER, \"pages\")");
}

fn write_network_constants(w: &mut ScriptWriter, request: &ScriptRequest) {
    w.line(format!(
        "REQUEST_DELAY = {}",
        request.network.delay_seconds_literal()
    ));
    if request.network.has_proxies() {
        w.line(format!(
            "PROXIES = {}",
            py_list(&request.network.proxy_list())
        ));
    }
}

/// Writes the page constants for live acquisition.
fn write_page_constants(w: &mut ScriptWriter, request: &ScriptRequest, clicks: bool) {
    let pagination = &request.pagination;
    if pagination.uses_url_pattern() {
        w.line(format!("URL_PREFIX = {}", py_str(&pagination.url_prefix)));
        w.line(format!("URL_SUFFIX = {}", py_str(&pagination.url_suffix)));
        w.line(format!("FIRST_PAGE = {}", pagination.first_page()));
        w.line(format!("PAGE_COUNT = {}", pagination.pages()));
        return;
    }
    let start = request.project.start_url().unwrap_or_default();
    w.line(format!("START_URL = {}", py_str(start)));
    if clicks {
        w.line(format!(
            "NEXT_SELECTOR = {}",
            py_str(pagination.next_selector.trim())
        ));
        w.line(format!("PAGE_COUNT = {}", pagination.pages()));
    }
}

fn write_page_order(w: &mut ScriptWriter) {
    w.block("def page_order(path):", |w| {
        w.line("digits = \"\".join(ch for ch in os.path.basename(path) if ch.isdigit())");
        w.line("return (int(digits) if digits else 0, path)");
    });
}

/// Writes a browser capture script that saves raw page markup.
pub(crate) fn write_browser_script(w: &mut ScriptWriter, request: &ScriptRequest, engine: BrowserEngine) {
    let proxies = request.network.has_proxies();
    let clicks = request.pagination.uses_next_button();

    let mut std_modules = vec!["os", "time"];
    if proxies {
        std_modules.push("random");
    }
    let mut third_party = Vec::new();
    match engine {
        BrowserEngine::Classic => {
            third_party.push("from selenium import webdriver");
            if clicks {
                third_party.push("from selenium.common.exceptions import NoSuchElementException");
                third_party.push("from selenium.webdriver.common.by import By");
            }
            if proxies {
                third_party.push("from selenium.webdriver.common.proxy import Proxy, ProxyType");
            }
        }
        BrowserEngine::Modern => third_party.push("from playwright.sync_api import sync_playwright"),
    }
    write_imports(w, std_modules, &third_party);

    write_project_constants(w, request);
    write_network_constants(w, request);
    write_page_constants(w, request, clicks);
    w.blank();

    w.block("def save_page(markup, page_number):", |w| {
        w.line("path = os.path.join(PAGES_FOLDER, f\"page_{page_number}.html\")");
        w.block("with open(path, \"w\", encoding=\"utf-8\") as handle:", |w| {
            w.line("handle.write(markup)");
        });
        w.line("print(f\"Saved {path}\")");
    });
    w.blank();

    w.line("os.makedirs(PAGES_FOLDER, exist_ok=True)");
    if proxies {
        w.line("PROXY = random.choice(PROXIES)");
        w.line("print(f\"Using proxy {PROXY}\")");
    }
    match engine {
        BrowserEngine::Classic => write_selenium_session(w, request),
        BrowserEngine::Modern => write_playwright_session(w, request),
    }
    w.blank();
    w.line("print(f\"Pages saved to {PAGES_FOLDER}. Read them with a local-files script to extract data.\")");
}

fn write_selenium_session(w: &mut ScriptWriter, request: &ScriptRequest) {
    let profile = request.network.browser_profile;
    w.line(format!("options = webdriver.{}()", profile.selenium_options()));
    if request.network.has_proxies() {
        w.line("proxy = Proxy()");
        w.line("proxy.proxy_type = ProxyType.MANUAL");
        w.line("proxy.http_proxy = PROXY");
        w.line("proxy.ssl_proxy = PROXY");
        w.line("options.proxy = proxy");
    }
    w.line(format!(
        "session = webdriver.{}(options=options)",
        profile.selenium_driver()
    ));
    w.block("try:", |w| write_page_loop(w, request, BrowserEngine::Classic));
    w.block("finally:", |w| w.line("session.quit()"));
}

fn write_playwright_session(w: &mut ScriptWriter, request: &ScriptRequest) {
    let profile = request.network.browser_profile;
    let mut launch_args = vec!["headless=False".to_string()];
    if let Some(channel) = profile.playwright_channel() {
        launch_args.push(format!("channel={}", py_str(channel)));
    }
    if request.network.has_proxies() {
        launch_args.push("proxy={\"server\": PROXY}".to_string());
    }
    w.block("with sync_playwright() as playwright:", |w| {
        w.line(format!(
            "browser = playwright.{}.launch({})",
            profile.playwright_family(),
            launch_args.join(", ")
        ));
        w.line("session = browser.new_page()");
        w.block("try:", |w| write_page_loop(w, request, BrowserEngine::Modern));
        w.block("finally:", |w| w.line("browser.close()"));
    });
}

fn navigate(engine: BrowserEngine, url: &str) -> String {
    match engine {
        BrowserEngine::Classic => format!("session.get({url})"),
        BrowserEngine::Modern => format!("session.goto({url})"),
    }
}

fn save_current(engine: BrowserEngine, page: &str) -> String {
    match engine {
        BrowserEngine::Classic => format!("save_page(session.page_source, {page})"),
        BrowserEngine::Modern => format!("save_page(session.content(), {page})"),
    }
}

fn write_page_loop(w: &mut ScriptWriter, request: &ScriptRequest, engine: BrowserEngine) {
    let pagination = &request.pagination;
    if pagination.uses_url_pattern() {
        w.block(
            "for page_number in range(FIRST_PAGE, FIRST_PAGE + PAGE_COUNT):",
            |w| {
                w.line("page_url = URL_PREFIX + str(page_number) + URL_SUFFIX");
                w.line(navigate(engine, "page_url"));
                w.line("time.sleep(REQUEST_DELAY)");
                w.line(save_current(engine, "page_number"));
            },
        );
    } else if pagination.uses_next_button() {
        w.line(navigate(engine, "START_URL"));
        w.block("for page_number in range(1, PAGE_COUNT + 1):", |w| {
            w.line("time.sleep(REQUEST_DELAY)");
            w.line(save_current(engine, "page_number"));
            w.block("if page_number == PAGE_COUNT:", |w| w.line("break"));
            write_next_click(w, engine);
        });
    } else {
        w.line(navigate(engine, "START_URL"));
        w.line("time.sleep(REQUEST_DELAY)");
        w.line(save_current(engine, "1"));
    }
}

fn write_next_click(w: &mut ScriptWriter, engine: BrowserEngine) {
    let stop = "print(f\"No next button after page {page_number}; stopping.\")";
    match engine {
        BrowserEngine::Classic => {
            w.block("try:", |w| {
                w.line("next_button = session.find_element(By.CSS_SELECTOR, NEXT_SELECTOR)");
            });
            w.block("except NoSuchElementException:", |w| {
                w.line(stop);
                w.line("break");
            });
            w.line("next_button.click()");
        }
        BrowserEngine::Modern => {
            w.line("next_button = session.query_selector(NEXT_SELECTOR)");
            w.block("if next_button is None:", |w| {
                w.line(stop);
                w.line("break");
            });
            w.line("next_button.click()");
            w.line("session.wait_for_load_state()");
        }
    }
}

/// Whether links can be resolved for this request's pages.
///
/// Live pages resolve against their own URL; saved pages only against an
/// explicit project base URL.
pub(crate) fn base_known(request: &ScriptRequest) -> bool {
    match request.origin {
        SourceOrigin::LiveUrl => true,
        SourceOrigin::LocalFiles => request.project.base_url().is_some(),
    }
}

fn static_imports(request: &ScriptRequest, live: bool) -> (Vec<&'static str>, Vec<&'static str>) {
    let mut std_modules = vec!["os"];
    if let Some(module) = output_import(&request.output) {
        std_modules.push(module);
    }
    let mut third_party = Vec::new();
    if live {
        std_modules.push("time");
        if request.network.has_proxies() {
            std_modules.push("random");
        }
        third_party.push("import requests");
    } else {
        std_modules.push("glob");
    }
    third_party.push("from bs4 import BeautifulSoup");
    if needs_urljoin(&request.extraction, base_known(request)) {
        third_party.push("from urllib.parse import urljoin");
    }
    (std_modules, third_party)
}

/// Writes a script that fetches live pages over HTTP and extracts them.
pub(crate) fn write_fetch_script(w: &mut ScriptWriter, request: &ScriptRequest) {
    let (std_modules, third_party) = static_imports(request, true);
    write_imports(w, std_modules, &third_party);

    write_project_constants(w, request);
    write_network_constants(w, request);
    w.line(format!(
        "USER_AGENT = {}",
        py_str(request.network.browser_profile.user_agent())
    ));
    write_page_constants(w, request, false);
    w.blank();

    write_extract_page(w, &request.extraction, true);
    w.blank();

    let proxies = request.network.has_proxies();
    w.block("def fetch(url):", |w| {
        if proxies {
            w.line("proxy = random.choice(PROXIES)");
            w.line(format!(
                "response = session.get(url, headers={{\"User-Agent\": USER_AGENT}}, proxies={{\"http\": proxy, \"https\": proxy}}, timeout={FETCH_TIMEOUT_SECS})"
            ));
        } else {
            w.line(format!(
                "response = session.get(url, headers={{\"User-Agent\": USER_AGENT}}, timeout={FETCH_TIMEOUT_SECS})"
            ));
        }
        w.line("response.raise_for_status()");
        w.line("return response.text");
    });
    w.blank();

    w.line("session = requests.Session()");
    w.line("all_data = []");
    if request.pagination.uses_url_pattern() {
        w.line("page_urls = [URL_PREFIX + str(page_number) + URL_SUFFIX for page_number in range(FIRST_PAGE, FIRST_PAGE + PAGE_COUNT)]");
    } else {
        if request.pagination.uses_next_button() {
            w.comment(STATIC_CLICK_NOTICE);
        }
        w.line("page_urls = [START_URL]");
    }
    w.block("for index, page_url in enumerate(page_urls):", |w| {
        w.block("if index > 0:", |w| w.line("time.sleep(REQUEST_DELAY)"));
        w.block("try:", |w| w.line("html = fetch(page_url)"));
        w.block("except requests.RequestException as error:", |w| {
            w.line("print(f\"Failed to fetch {page_url}: {error}\")");
            w.line("continue");
        });
        w.line("soup = BeautifulSoup(html, \"html.parser\")");
        w.line("records = extract_page(soup, page_url)");
        w.line("all_data.extend(records)");
        w.line("print(f\"{page_url}: {len(records)} extracted\")");
    });
    w.blank();
    write_output(w, &request.extraction, &request.output);
}

/// Writes a script that reads saved pages from the project folder.
pub(crate) fn write_saved_pages_script(w: &mut ScriptWriter, request: &ScriptRequest) {
    let (std_modules, third_party) = static_imports(request, false);
    write_imports(w, std_modules, &third_party);

    let base_url = request.project.base_url();
    write_project_constants(w, request);
    if let Some(base) = base_url {
        w.line(format!("BASE_URL = {}", py_str(base)));
    }
    w.blank();

    write_extract_page(w, &request.extraction, base_url.is_some());
    w.blank();
    write_page_order(w);
    w.blank();

    let page_url = if base_url.is_some() { "BASE_URL" } else { "None" };
    w.line("all_data = []");
    w.line("page_files = sorted(glob.glob(os.path.join(PAGES_FOLDER, \"*.html\")), key=page_order)");
    w.block("if not page_files:", |w| {
        w.line("print(f\"No saved pages found in {PAGES_FOLDER}\")");
    });
    w.block("for path in page_files:", |w| {
        w.block("with open(path, encoding=\"utf-8\") as handle:", |w| {
            w.line("soup = BeautifulSoup(handle.read(), \"html.parser\")");
        });
        w.line(format!("records = extract_page(soup, {page_url})"));
        w.line("all_data.extend(records)");
        w.line("print(f\"{os.path.basename(path)}: {len(records)} extracted\")");
    });
    w.blank();
    write_output(w, &request.extraction, &request.output);
}
