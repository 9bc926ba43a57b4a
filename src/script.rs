// Companion Apps Script for the spreadsheet side of roster fetch and sync
//
// This runs inside Google Sheets, not in EduLog. `edulog script` prints it so
// it can be pasted into Extensions > Apps Script and deployed as a web app
// that anyone can access; the deployment URL is the endpoint EduLog uses.

/// Tabs whose name contains this marker are log tabs, not classes.
pub const RESERVED_TAB_MARKER: &str = "_기록";

/// Header row written when a class log tab is first created.
pub const LOG_HEADER: [&str; 4] = ["날짜", "번호", "이름", "내용"];

pub const COMPANION_SCRIPT: &str = r##"function doGet(e) {
  const ss = SpreadsheetApp.getActiveSpreadsheet();
  const sheets = ss.getSheets();
  const data = sheets.map(sheet => {
    const name = sheet.getName();
    if (name.includes("_기록")) return null;
    const values = sheet.getDataRange().getValues();
    const students = values.slice(1).map(row => ({
      id: name + "_" + row[0],
      number: row[0],
      name: row[1]
    })).filter(s => s.name);
    return { id: name, name: name, students: students };
  }).filter(d => d !== null);
  return ContentService.createTextOutput(JSON.stringify(data)).setMimeType(ContentService.MimeType.JSON);
}

function doPost(e) {
  const data = JSON.parse(e.postData.contents);
  const ss = SpreadsheetApp.getActiveSpreadsheet();
  const sheetName = data.className + "_기록";
  let sheet = ss.getSheetByName(sheetName);

  if (!sheet) {
    sheet = ss.insertSheet(sheetName);
    sheet.appendRow(["날짜", "번호", "이름", "내용"]);
    sheet.getRange("A1:D1").setBackground("#4f46e5").setFontColor("white").setFontWeight("bold");
    sheet.setFrozenRows(1);
  }

  const now = new Date();
  const dateStr = Utilities.formatDate(now, "GMT+9", "yyyy-MM-dd HH:mm");
  sheet.appendRow([dateStr, data.studentNumber, data.studentName, data.content]);
  return ContentService.createTextOutput("Success").setMimeType(ContentService.MimeType.TEXT);
}
"##;

/// Setup steps shown next to the script.
pub const SETUP_STEPS: &str = "\
1. 구글 시트에서 확장 프로그램 > Apps Script를 엽니다.
2. 아래 코드를 붙여 넣고 저장합니다.
3. 배포 > 새 배포 > 유형: 웹 앱 > 액세스 권한: 모든 사용자로 배포합니다.
4. `edulog settings --url <웹 앱 URL>` 을 실행합니다.";
